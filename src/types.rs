//! Core data types shared by the landmark filter and the gesture controller.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Which hand an observation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chirality {
    /// Left hand, drives pitch
    Left,
    /// Right hand, drives speed
    Right,
}

impl Chirality {
    /// Both chiralities in slot order
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    const fn slot(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// A point in normalized [0, 1] camera space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Plane Euclidean distance to `other`
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A detected keypoint together with the detector's confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub location: Point2,
    pub confidence: f32,
}

impl Keypoint {
    #[must_use]
    pub const fn new(x: f64, y: f64, confidence: f32) -> Self {
        Self {
            location: Point2::new(x, y),
            confidence,
        }
    }
}

/// Raw per-hand output of the pose detector for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    pub chirality: Chirality,
    #[serde(default)]
    pub thumb_tip: Option<Keypoint>,
    #[serde(default)]
    pub index_tip: Option<Keypoint>,
    #[serde(default)]
    pub middle_tip: Option<Keypoint>,
    #[serde(default)]
    pub wrist: Option<Point2>,
}

impl HandObservation {
    /// Observation with only the two control keypoints set
    #[must_use]
    pub const fn pinch(chirality: Chirality, thumb_tip: Keypoint, index_tip: Keypoint) -> Self {
        Self {
            chirality,
            thumb_tip: Some(thumb_tip),
            index_tip: Some(index_tip),
            middle_tip: None,
            wrist: None,
        }
    }

    /// True when every coordinate and confidence present is a finite number
    #[must_use]
    pub fn is_finite(&self) -> bool {
        let keypoint_ok = |k: &Keypoint| k.location.is_finite() && k.confidence.is_finite();
        [self.thumb_tip, self.index_tip, self.middle_tip].iter().flatten().all(keypoint_ok)
            && self.wrist.map_or(true, Point2::is_finite)
    }
}

/// Smoothed landmarks for one hand in one frame.
///
/// Thumb and index tips are always both present; a hand that cannot resolve
/// both is omitted from the frame entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilteredLandmarks {
    pub chirality: Chirality,
    pub thumb_tip: Point2,
    pub index_tip: Point2,
    pub middle_tip: Option<Point2>,
    pub wrist: Option<Point2>,
}

impl FilteredLandmarks {
    /// Thumb-to-index pinch distance
    #[must_use]
    pub fn pinch_distance(&self) -> f64 {
        self.thumb_tip.distance(self.index_tip)
    }
}

/// Fixed two-slot storage indexed by [`Chirality`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerHand<T> {
    slots: [T; 2],
}

impl<T> PerHand<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PerHand<U> {
        PerHand { slots: self.slots.map(f) }
    }
}

impl<T> PerHand<Option<T>> {
    /// True when neither slot holds a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.slots = [None, None];
    }
}

impl<T> Index<Chirality> for PerHand<T> {
    type Output = T;

    fn index(&self, hand: Chirality) -> &T {
        &self.slots[hand.slot()]
    }
}

impl<T> IndexMut<Chirality> for PerHand<T> {
    fn index_mut(&mut self, hand: Chirality) -> &mut T {
        &mut self.slots[hand.slot()]
    }
}

/// Group a frame's filtered hands into chirality slots
#[must_use]
pub fn by_chirality(hands: &[FilteredLandmarks]) -> PerHand<Option<FilteredLandmarks>> {
    let mut slots: PerHand<Option<FilteredLandmarks>> = PerHand::default();
    for hand in hands {
        if slots[hand.chirality].is_none() {
            slots[hand.chirality] = Some(*hand);
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point2::new(0.1, 0.1);
        let b = Point2::new(0.4, 0.5);
        assert!((a.distance(b) - 0.5).abs() < 1e-12);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_per_hand_indexing() {
        let mut slots: PerHand<Option<f64>> = PerHand::default();
        assert!(slots.is_empty());

        slots[Chirality::Right] = Some(0.2);
        assert_eq!(slots[Chirality::Left], None);
        assert_eq!(slots[Chirality::Right], Some(0.2));
        assert!(!slots.is_empty());

        slots.clear();
        assert!(slots.is_empty());
    }

    #[test]
    fn test_by_chirality_keeps_first() {
        let hand = |chirality, x| FilteredLandmarks {
            chirality,
            thumb_tip: Point2::new(x, 0.0),
            index_tip: Point2::new(x, 0.1),
            middle_tip: None,
            wrist: None,
        };
        let slots = by_chirality(&[hand(Chirality::Left, 0.1), hand(Chirality::Left, 0.9)]);
        assert_eq!(slots[Chirality::Left].map(|h| h.thumb_tip.x), Some(0.1));
        assert!(slots[Chirality::Right].is_none());
    }

    #[test]
    fn test_chirality_yaml_names() {
        let parsed: Chirality = serde_yaml::from_str("left").unwrap();
        assert_eq!(parsed, Chirality::Left);
    }
}
