//! Constants used throughout the control pipeline

/// Minimum keypoint confidence for a hand to count as observed
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.3;

/// Per-axis displacement (normalized frame units) treated as a tracking jump
pub const DEFAULT_JUMP_THRESHOLD: f64 = 0.15;

/// Landmark EMA factor for ordinary motion
pub const DEFAULT_LANDMARK_SMOOTHING: f64 = 0.6;

/// Landmark EMA factor applied when a jump is detected
pub const DEFAULT_JUMP_FACTOR: f64 = 0.1;

/// Neutral pitch offset in cents
pub const NEUTRAL_PITCH: f64 = 0.0;

/// Neutral playback speed multiplier
pub const NEUTRAL_SPEED: f64 = 1.0;

/// Playback speed bounds (inclusive)
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 4.0;

/// Cents per octave
pub const CENTS_PER_OCTAVE: f64 = 1200.0;

/// Default symmetric pitch limit in cents (two octaves)
pub const DEFAULT_PITCH_LIMIT_CENTS: f64 = 2400.0;

/// Default parameter smoothing factor
pub const DEFAULT_PARAMETER_SMOOTHING: f64 = 0.2;

/// Default both-hands-absent debounce before auto-pause
pub const DEFAULT_NO_HANDS_DELAY_SECS: f64 = 1.0;

/// Upper bound accepted for the no-hands debounce
pub const MAX_NO_HANDS_DELAY_SECS: f64 = 3600.0;

/// Values visited by the smoothing cycle intent
pub const SMOOTHING_OPTIONS: [f64; 5] = [0.05, 0.1, 0.2, 0.5, 0.85];

/// Values visited by the no-hands delay cycle intent
pub const NO_HANDS_DELAY_OPTIONS: [f64; 4] = [0.5, 1.0, 2.0, 5.0];

/// Tolerance used when matching a setting against a cycle table
pub const EPSILON: f64 = 1e-9;
