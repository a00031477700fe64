//! Per-hand landmark smoothing with confidence gating.
//!
//! Each frame, hands whose thumb and index tips are both confidently detected
//! are smoothed against the previous frame's output for the same chirality.
//! Hands missing from a frame lose their history, so a returning hand starts
//! from its raw position instead of blending with where it left.

use crate::{
    config::FilterConfig,
    filters::adaptive::damped_step,
    types::{FilteredLandmarks, HandObservation, Keypoint, PerHand, Point2},
};
use log::{debug, warn};

/// Filtered landmarks retained between frames, one slot per chirality
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    hands: PerHand<Option<FilteredLandmarks>>,
}

impl FilterState {
    /// Retained landmarks for every tracked hand
    pub fn hands(&self) -> &PerHand<Option<FilteredLandmarks>> {
        &self.hands
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

/// Filter one frame of observations against the previous state.
///
/// Returns at most one entry per chirality and the state to carry into the
/// next frame. The new state only contains hands present in this frame.
/// `config` is used as given; [`LandmarkFilter::new`] is the checked entry.
#[must_use]
pub fn update(
    observations: &[HandObservation],
    previous: &FilterState,
    config: &FilterConfig,
) -> (Vec<FilteredLandmarks>, FilterState) {
    let mut next = FilterState::default();
    let mut output = Vec::with_capacity(2);

    for observation in observations {
        let chirality = observation.chirality;
        if next.hands[chirality].is_some() {
            warn!("Duplicate {:?} hand in one frame, keeping the first", chirality);
            continue;
        }

        let (Some(thumb), Some(index)) = (
            gated(observation.thumb_tip, config.confidence_threshold),
            gated(observation.index_tip, config.confidence_threshold),
        ) else {
            debug!("Dropping {:?} hand: thumb or index below confidence", chirality);
            continue;
        };

        let prior = previous.hands[chirality];
        let landmarks = FilteredLandmarks {
            chirality,
            thumb_tip: smooth(thumb, prior.map(|p| p.thumb_tip), config),
            index_tip: smooth(index, prior.map(|p| p.index_tip), config),
            middle_tip: gated(observation.middle_tip, config.confidence_threshold),
            wrist: observation.wrist,
        };

        next.hands[chirality] = Some(landmarks);
        output.push(landmarks);
    }

    (output, next)
}

fn gated(keypoint: Option<Keypoint>, threshold: f32) -> Option<Point2> {
    keypoint
        .filter(|k| k.confidence > threshold)
        .map(|k| k.location)
}

fn smooth(raw: Point2, previous: Option<Point2>, config: &FilterConfig) -> Point2 {
    previous.map_or(raw, |previous| {
        damped_step(previous, raw, config.smoothing_factor, config.jump_factor, config.jump_threshold)
    })
}

/// Landmark filter that owns its state across frames
#[derive(Debug, Clone, Default)]
pub struct LandmarkFilter {
    config: FilterConfig,
    state: FilterState,
}

impl LandmarkFilter {
    /// # Panics
    ///
    /// Panics if `config` fails [`FilterConfig::validate`]
    #[must_use]
    pub fn new(config: FilterConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("Invalid filter settings: {}", e);
        }
        Self {
            config,
            state: FilterState::default(),
        }
    }

    /// Filter one frame and retain the result for the next
    pub fn update(&mut self, observations: &[HandObservation]) -> Vec<FilteredLandmarks> {
        let (output, next) = update(observations, &self.state, &self.config);
        self.state = next;
        output
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = FilterState::default();
    }
}
