use super::PointFilter;
use crate::constants::{DEFAULT_JUMP_FACTOR, DEFAULT_JUMP_THRESHOLD, DEFAULT_LANDMARK_SMOOTHING};
use crate::types::Point2;

/// Exponential filter that slows down on large single-frame jumps.
///
/// Ordinary motion converges with `smoothing`. When either axis moves more
/// than `jump_threshold` since the last output, the step uses `jump_factor`
/// instead, so a one-frame tracking glitch barely moves the output while a
/// real relocation is still reached after a few frames.
#[derive(Debug, Clone)]
pub struct AdaptiveEmaFilter {
    smoothing: f64,
    jump_factor: f64,
    jump_threshold: f64,
    last: Option<Point2>,
}

impl AdaptiveEmaFilter {
    /// Create a new filter
    ///
    /// # Panics
    ///
    /// Panics if either factor is outside (0, 1] or the threshold is not positive
    #[must_use]
    pub fn new(smoothing: f64, jump_factor: f64, jump_threshold: f64) -> Self {
        assert!(smoothing > 0.0 && smoothing <= 1.0, "Smoothing must be in (0, 1]");
        assert!(jump_factor > 0.0 && jump_factor <= 1.0, "Jump factor must be in (0, 1]");
        assert!(jump_threshold > 0.0, "Jump threshold must be positive, got {}", jump_threshold);
        Self {
            smoothing,
            jump_factor,
            jump_threshold,
            last: None,
        }
    }

}

/// One jump-damped EMA step from `previous` toward `raw`.
///
/// Uses `jump_factor` when either axis moved more than `jump_threshold`,
/// `smoothing` otherwise. Factors are not checked here.
#[must_use]
pub fn damped_step(previous: Point2, raw: Point2, smoothing: f64, jump_factor: f64, jump_threshold: f64) -> Point2 {
    let dx = (raw.x - previous.x).abs();
    let dy = (raw.y - previous.y).abs();
    let factor = if dx > jump_threshold || dy > jump_threshold {
        jump_factor
    } else {
        smoothing
    };
    Point2::new(
        previous.x + (raw.x - previous.x) * factor,
        previous.y + (raw.y - previous.y) * factor,
    )
}

impl Default for AdaptiveEmaFilter {
    fn default() -> Self {
        Self::new(DEFAULT_LANDMARK_SMOOTHING, DEFAULT_JUMP_FACTOR, DEFAULT_JUMP_THRESHOLD)
    }
}

impl PointFilter for AdaptiveEmaFilter {
    fn apply(&mut self, raw: Point2) -> Point2 {
        let filtered = match self.last {
            Some(previous) => damped_step(previous, raw, self.smoothing, self.jump_factor, self.jump_threshold),
            None => raw,
        };

        self.last = Some(filtered);
        filtered
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn name(&self) -> &str {
        "AdaptiveEmaFilter"
    }
}
