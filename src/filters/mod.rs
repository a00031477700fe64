//! Signal filtering algorithms for smoothing hand landmarks and control values.
//!
//! Landmarks are smoothed per keypoint with a jump-aware exponential filter;
//! the control parameters derived from them get a second, scalar exponential
//! stage before reaching the audio sink.

/// Jump-damped exponential filter for 2D keypoints
pub mod adaptive;

/// Scalar exponential smoothing toward a moving target
pub mod exponential;

use crate::types::Point2;

/// Trait for per-keypoint position filters
pub trait PointFilter: Send + Sync {
    /// Apply filter to a raw position
    fn apply(&mut self, raw: Point2) -> Point2;

    /// Forget all history so the next sample passes through unchanged
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through positions unchanged
pub struct NoFilter;

impl PointFilter for NoFilter {
    fn apply(&mut self, raw: Point2) -> Point2 {
        raw
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}
