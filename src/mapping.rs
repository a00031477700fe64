//! Mapping from pinch-distance deltas to pitch and speed targets.

use crate::constants::{CENTS_PER_OCTAVE, MAX_SPEED, MIN_SPEED, NEUTRAL_SPEED};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gesture sensitivity level. At every level the pitch gain exceeds the
/// speed gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    #[default]
    Standard,
    High,
    Extreme,
}

impl Sensitivity {
    /// Gain applied to the pitch delta (in octaves per unit distance)
    pub const fn pitch_multiplier(self) -> f64 {
        match self {
            Self::Standard => 4.5,
            Self::High => 6.0,
            Self::Extreme => 9.0,
        }
    }

    /// Gain applied to the speed delta
    pub const fn speed_multiplier(self) -> f64 {
        match self {
            Self::Standard => 2.5,
            Self::High => 4.0,
            Self::Extreme => 6.0,
        }
    }

    /// Next level, wrapping back to `Standard`
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Standard => Self::High,
            Self::High => Self::Extreme,
            Self::Extreme => Self::Standard,
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Standard => "Standard",
            Self::High => "High",
            Self::Extreme => "Extreme",
        };
        f.write_str(name)
    }
}

/// Pitch target in cents for a distance delta, bounded by `limit_cents`
pub fn pitch_target(delta: f64, sensitivity: Sensitivity, limit_cents: f64) -> f64 {
    (delta * CENTS_PER_OCTAVE * sensitivity.pitch_multiplier()).clamp(-limit_cents, limit_cents)
}

/// Speed multiplier target for a distance delta, clamped to the playable range
pub fn speed_target(delta: f64, sensitivity: Sensitivity) -> f64 {
    (NEUTRAL_SPEED + delta * sensitivity.speed_multiplier()).clamp(MIN_SPEED, MAX_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [Sensitivity; 3] = [Sensitivity::Standard, Sensitivity::High, Sensitivity::Extreme];

    #[test]
    fn test_pitch_gain_exceeds_speed_gain() {
        for level in LEVELS {
            assert!(level.pitch_multiplier() > level.speed_multiplier(), "{level}");
        }
    }

    #[test]
    fn test_levels_are_distinct_and_increasing() {
        assert!(Sensitivity::Standard.pitch_multiplier() < Sensitivity::High.pitch_multiplier());
        assert!(Sensitivity::High.pitch_multiplier() < Sensitivity::Extreme.pitch_multiplier());
        assert!(Sensitivity::Standard.speed_multiplier() < Sensitivity::High.speed_multiplier());
        assert!(Sensitivity::High.speed_multiplier() < Sensitivity::Extreme.speed_multiplier());
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Sensitivity::Standard.cycle(), Sensitivity::High);
        assert_eq!(Sensitivity::High.cycle(), Sensitivity::Extreme);
        assert_eq!(Sensitivity::Extreme.cycle(), Sensitivity::Standard);
    }

    #[test]
    fn test_pitch_target_standard() {
        let target = pitch_target(0.02, Sensitivity::Standard, 2400.0);
        assert!((target - 108.0).abs() < 1e-9);
    }

    #[test]
    fn test_pitch_target_limit() {
        assert_eq!(pitch_target(1.0, Sensitivity::Extreme, 2400.0), 2400.0);
        assert_eq!(pitch_target(-1.0, Sensitivity::Extreme, 2400.0), -2400.0);
    }

    #[test]
    fn test_speed_target_clamped() {
        for level in LEVELS {
            for delta in [-10.0, -0.5, -0.1, 0.0, 0.1, 0.5, 10.0] {
                let speed = speed_target(delta, level);
                assert!((MIN_SPEED..=MAX_SPEED).contains(&speed), "{level} {delta} -> {speed}");
            }
        }
        assert_eq!(speed_target(0.0, Sensitivity::High), NEUTRAL_SPEED);
    }
}
