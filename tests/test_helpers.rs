//! Helper functions and utilities for tests

#![allow(dead_code)]

use gesture_flow::{
    config::ControlConfig,
    controller::GestureController,
    sink::{RecordingSink, SinkCommand},
    types::{Chirality, FilteredLandmarks, HandObservation, Keypoint, Point2},
};
use std::time::{Duration, Instant};

/// Raw observation with thumb at `(x, y)` and index `gap` below it
pub fn observation(chirality: Chirality, x: f64, y: f64, gap: f64, confidence: f32) -> HandObservation {
    HandObservation::pinch(
        chirality,
        Keypoint::new(x, y, confidence),
        Keypoint::new(x, y + gap, confidence),
    )
}

/// Filtered hand whose pinch distance is exactly `distance`
pub fn pinch(chirality: Chirality, distance: f64) -> FilteredLandmarks {
    FilteredLandmarks {
        chirality,
        thumb_tip: Point2::new(0.0, 0.0),
        index_tip: Point2::new(0.0, distance),
        middle_tip: None,
        wrist: None,
    }
}

/// Controller with default settings and a shared recording sink
pub fn recording_controller(config: ControlConfig) -> (GestureController, RecordingSink) {
    let sink = RecordingSink::new();
    (GestureController::new(config, Box::new(sink.clone())), sink)
}

/// Controller that has loaded a track and calibrated both hands at `t0`
pub fn calibrated_controller(
    config: ControlConfig,
    left: f64,
    right: f64,
    t0: Instant,
) -> (GestureController, RecordingSink) {
    let (mut controller, sink) = recording_controller(config);
    controller.load_track("test track");
    controller.process_frame(&[pinch(Chirality::Left, left), pinch(Chirality::Right, right)], t0);
    assert!(controller.is_playing(), "calibration did not start playback");
    sink.take();
    (controller, sink)
}

pub fn count(commands: &[SinkCommand], wanted: SinkCommand) -> usize {
    commands.iter().filter(|&&c| c == wanted).count()
}

pub fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

/// Poll `condition` until it holds or `timeout` passes
pub fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}
