/// Exponential smoothing of a scalar toward a per-frame target.
///
/// Unlike a sample filter this always holds a current value, which can be
/// snapped to an exact number (a neutral reset) without passing through the
/// smoothing step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialSmoother {
    alpha: f64,
    value: f64,
}

impl ExponentialSmoother {
    /// # Panics
    ///
    /// Panics if `alpha` is outside (0, 1]
    #[must_use]
    pub fn new(alpha: f64, initial: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self { alpha, value: initial }
    }

    /// Move the current value toward `target` and return it
    pub fn step(&mut self, target: f64) -> f64 {
        self.value += (target - self.value) * self.alpha;
        self.value
    }

    /// Set the value directly, bypassing smoothing
    pub fn snap(&mut self, value: f64) {
        self.value = value;
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    /// # Panics
    ///
    /// Panics if `alpha` is outside (0, 1]
    pub fn set_alpha(&mut self, alpha: f64) {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        self.alpha = alpha;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_smoother() {
        let mut smoother = ExponentialSmoother::new(0.5, 10.0);

        let v = smoother.step(20.0);
        assert_eq!(v, 15.0); // 10 + (20 - 10) * 0.5
        assert_eq!(smoother.value(), 15.0);
    }

    #[test]
    fn test_alpha_bounds() {
        // High alpha = less smoothing
        let mut fast = ExponentialSmoother::new(0.9, 10.0);
        assert!((fast.step(20.0) - 19.0).abs() < 0.001);

        // Low alpha = more smoothing
        let mut slow = ExponentialSmoother::new(0.1, 10.0);
        assert!((slow.step(20.0) - 11.0).abs() < 0.001);

        // Alpha of one tracks the target exactly
        let mut exact = ExponentialSmoother::new(1.0, 10.0);
        assert_eq!(exact.step(20.0), 20.0);
    }

    #[test]
    fn test_snap_bypasses_smoothing() {
        let mut smoother = ExponentialSmoother::new(0.2, 350.0);
        smoother.snap(0.0);
        assert_eq!(smoother.value(), 0.0);
    }

    #[test]
    #[should_panic(expected = "Alpha must be in (0, 1]")]
    fn test_set_alpha_rejects_zero() {
        let mut smoother = ExponentialSmoother::new(0.2, 0.0);
        smoother.set_alpha(0.0);
    }
}
