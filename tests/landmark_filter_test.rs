//! Behavioural tests for landmark smoothing

mod test_helpers;

use gesture_flow::{
    config::FilterConfig,
    landmark_filter::{update, FilterState, LandmarkFilter},
    types::{Chirality, Point2},
};
use test_helpers::observation;

#[test]
fn test_stable_input_converges() {
    let mut filter = LandmarkFilter::default();
    filter.update(&[observation(Chirality::Left, 0.5, 0.5, 0.1, 0.9)]);

    let mut out = Vec::new();
    for _ in 0..5 {
        out = filter.update(&[observation(Chirality::Left, 0.6, 0.5, 0.1, 0.9)]);
    }

    // residual is 0.1 * 0.4^5
    assert!((out[0].thumb_tip.x - 0.6).abs() < 2e-3);
    assert!((out[0].index_tip.x - 0.6).abs() < 2e-3);
}

#[test]
fn test_identical_input_is_fixed_point() {
    let mut filter = LandmarkFilter::default();
    for _ in 0..10 {
        let out = filter.update(&[observation(Chirality::Right, 0.3, 0.7, 0.05, 0.9)]);
        assert_eq!(out[0].thumb_tip, Point2::new(0.3, 0.7));
    }
}

#[test]
fn test_single_frame_outlier_is_damped() {
    let mut filter = LandmarkFilter::default();
    for _ in 0..3 {
        filter.update(&[observation(Chirality::Left, 0.5, 0.5, 0.1, 0.9)]);
    }

    let jump = 0.3;
    let glitch = filter.update(&[observation(Chirality::Left, 0.5 + jump, 0.5, 0.1, 0.9)]);
    let displacement = glitch[0].thumb_tip.x - 0.5;
    assert!(displacement <= 0.1 * jump + 1e-12, "moved {displacement}");
    assert!(displacement > 0.0);

    // reverting pulls back toward the true position
    let back = filter.update(&[observation(Chirality::Left, 0.5, 0.5, 0.1, 0.9)]);
    assert!((back[0].thumb_tip.x - 0.5).abs() < displacement);
}

#[test]
fn test_real_relocation_is_reached() {
    let mut filter = LandmarkFilter::default();
    filter.update(&[observation(Chirality::Left, 0.2, 0.5, 0.1, 0.9)]);

    let mut x = 0.2;
    for _ in 0..30 {
        x = filter.update(&[observation(Chirality::Left, 0.8, 0.5, 0.1, 0.9)])[0].thumb_tip.x;
    }
    assert!((x - 0.8).abs() < 1e-3);
}

#[test]
fn test_absence_clears_retention() {
    let mut filter = LandmarkFilter::default();
    filter.update(&[observation(Chirality::Left, 0.2, 0.2, 0.1, 0.9)]);
    filter.update(&[]);

    let out = filter.update(&[observation(Chirality::Left, 0.25, 0.25, 0.1, 0.9)]);
    assert_eq!(out[0].thumb_tip, Point2::new(0.25, 0.25));
}

#[test]
fn test_low_confidence_frame_counts_as_absence() {
    let mut filter = LandmarkFilter::default();
    filter.update(&[observation(Chirality::Right, 0.2, 0.2, 0.1, 0.9)]);

    let dropped = filter.update(&[observation(Chirality::Right, 0.21, 0.2, 0.1, 0.2)]);
    assert!(dropped.is_empty());

    let out = filter.update(&[observation(Chirality::Right, 0.22, 0.2, 0.1, 0.9)]);
    assert_eq!(out[0].thumb_tip, Point2::new(0.22, 0.2));
}

#[test]
fn test_hands_are_filtered_independently() {
    let mut filter = LandmarkFilter::default();
    filter.update(&[observation(Chirality::Left, 0.2, 0.2, 0.1, 0.9)]);

    // right hand appears for the first time where the left one was
    let out = filter.update(&[
        observation(Chirality::Left, 0.3, 0.2, 0.1, 0.9),
        observation(Chirality::Right, 0.7, 0.7, 0.1, 0.9),
    ]);
    let right = out.iter().find(|h| h.chirality == Chirality::Right).unwrap();
    let left = out.iter().find(|h| h.chirality == Chirality::Left).unwrap();

    assert_eq!(right.thumb_tip, Point2::new(0.7, 0.7));
    assert!((left.thumb_tip.x - 0.26).abs() < 1e-12);
}

#[test]
fn test_custom_threshold_config() {
    let config = FilterConfig {
        confidence_threshold: 0.8,
        ..FilterConfig::default()
    };
    let (out, state) = update(
        &[observation(Chirality::Left, 0.2, 0.2, 0.1, 0.75)],
        &FilterState::default(),
        &config,
    );
    assert!(out.is_empty());
    assert!(state.is_empty());
}
