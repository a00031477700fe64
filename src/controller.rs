//! Gesture controller: calibration, auto-rebalance, parameter mapping and
//! the presence-driven play/pause state machine.
//!
//! The left hand's thumb-index distance drives pitch, the right hand's drives
//! speed. Each is measured relative to a per-hand baseline captured when the
//! hand is calibrated or re-acquired, mapped through the sensitivity level,
//! and smoothed before being sent to the audio sink.
//!
//! Time is passed in explicitly so the no-hands debounce can be driven either
//! by a wall clock or by a recorded trace.

use crate::{
    config::ControlConfig,
    constants::{EPSILON, MAX_SPEED, MIN_SPEED, NEUTRAL_PITCH, NEUTRAL_SPEED, NO_HANDS_DELAY_OPTIONS, SMOOTHING_OPTIONS},
    filters::exponential::ExponentialSmoother,
    mapping::{pitch_target, speed_target, Sensitivity},
    sink::AudioSink,
    timer::{NoHandsTimer, TimerScheduler},
    types::{by_chirality, Chirality, FilteredLandmarks, PerHand},
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Explicit user actions, as opposed to the per-frame gesture loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserIntent {
    LoadTrack { title: String },
    TogglePlayPause,
    Restart,
    Rebalance,
    CycleSensitivity,
    CycleSmoothing,
    CycleNoHandsDelay,
}

/// Controller phase. The no-hands timer only exists while playing.
#[derive(Debug)]
pub enum Phase {
    /// Nothing loaded, or playback paused
    Idle,
    /// Track loaded, waiting for both hands to set baselines
    Calibrating,
    /// Gestures drive the audio parameters
    Playing {
        /// Armed while both hands are absent
        no_hands: Option<NoHandsTimer>,
    },
}

/// Field-less view of [`Phase`] for observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Calibrating,
    Playing,
}

impl Phase {
    pub const fn kind(&self) -> PhaseKind {
        match self {
            Self::Idle => PhaseKind::Idle,
            Self::Calibrating => PhaseKind::Calibrating,
            Self::Playing { .. } => PhaseKind::Playing,
        }
    }
}

/// Read-only state published to presentation
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSnapshot {
    pub phase: PhaseKind,
    /// Pitch offset in cents
    pub current_pitch: f64,
    /// Playback speed multiplier
    pub current_speed: f64,
    pub is_playing: bool,
    /// Whether calibration instructions should be shown
    pub show_instructions: bool,
    pub track_title: Option<String>,
    pub no_hands_deadline: Option<Instant>,
    pub sensitivity: Sensitivity,
    pub smoothing: f64,
    pub no_hands_delay_secs: f64,
}

impl Default for ControlSnapshot {
    fn default() -> Self {
        let config = ControlConfig::default();
        Self {
            phase: PhaseKind::Idle,
            current_pitch: NEUTRAL_PITCH,
            current_speed: NEUTRAL_SPEED,
            is_playing: false,
            show_instructions: false,
            track_title: None,
            no_hands_deadline: None,
            sensitivity: config.sensitivity,
            smoothing: config.smoothing,
            no_hands_delay_secs: config.no_hands_delay_secs,
        }
    }
}

/// Maps filtered hand landmarks to audio commands
pub struct GestureController {
    config: ControlConfig,
    phase: Phase,
    baselines: PerHand<Option<f64>>,
    /// Pinch distances seen in the most recent frame
    present: PerHand<Option<f64>>,
    pitch: ExponentialSmoother,
    speed: ExponentialSmoother,
    track_title: Option<String>,
    sink: Box<dyn AudioSink>,
    scheduler: Option<Box<dyn TimerScheduler>>,
}

impl GestureController {
    /// Create a controller driving `sink`
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`ControlConfig::validate`]: smoothing outside
    /// (0, 1], a non-positive pitch limit, or a no-hands delay that is not a
    /// positive number of seconds up to an hour
    pub fn new(config: ControlConfig, sink: Box<dyn AudioSink>) -> Self {
        assert_valid(&config);
        Self {
            pitch: ExponentialSmoother::new(config.smoothing, NEUTRAL_PITCH),
            speed: ExponentialSmoother::new(config.smoothing, NEUTRAL_SPEED),
            config,
            phase: Phase::Idle,
            baselines: PerHand::default(),
            present: PerHand::default(),
            track_title: None,
            sink,
            scheduler: None,
        }
    }

    /// Notify `scheduler` whenever a no-hands timer is armed
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Box<dyn TimerScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    pub const fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing { .. })
    }

    pub const fn show_instructions(&self) -> bool {
        matches!(self.phase, Phase::Calibrating)
    }

    pub const fn is_track_loaded(&self) -> bool {
        self.track_title.is_some()
    }

    pub const fn current_pitch(&self) -> f64 {
        self.pitch.value()
    }

    pub const fn current_speed(&self) -> f64 {
        self.speed.value()
    }

    /// Baseline distance for `hand`, if calibrated
    pub fn baseline(&self, hand: Chirality) -> Option<f64> {
        self.baselines[hand]
    }

    /// Current user-facing settings
    pub const fn settings(&self) -> &ControlConfig {
        &self.config
    }

    /// Replace the user-facing settings, e.g. with persisted values
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`GestureController::new`]
    pub fn apply_settings(&mut self, config: ControlConfig) {
        assert_valid(&config);
        self.pitch.set_alpha(config.smoothing);
        self.speed.set_alpha(config.smoothing);
        self.config = config;
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            phase: self.phase.kind(),
            current_pitch: self.pitch.value(),
            current_speed: self.speed.value(),
            is_playing: self.is_playing(),
            show_instructions: self.show_instructions(),
            track_title: self.track_title.clone(),
            no_hands_deadline: match &self.phase {
                Phase::Playing { no_hands: Some(timer) } => Some(timer.deadline()),
                _ => None,
            },
            sensitivity: self.config.sensitivity,
            smoothing: self.config.smoothing,
            no_hands_delay_secs: self.config.no_hands_delay_secs,
        }
    }

    // ── Per-frame processing ────────────────────────────────────────────────

    /// Process one frame of filtered landmarks observed at `now`
    pub fn process_frame(&mut self, hands: &[FilteredLandmarks], now: Instant) {
        // A deadline that passed before this frame was captured wins over
        // hands reappearing in it
        self.tick(now);
        self.present = pinch_distances(hands);

        match self.phase {
            Phase::Idle => {}
            Phase::Calibrating => {
                if self.try_calibrate() {
                    self.update_playing(now);
                }
            }
            Phase::Playing { .. } => self.update_playing(now),
        }
    }

    /// Check the no-hands timer without a new frame
    pub fn tick(&mut self, now: Instant) {
        if self.no_hands_elapsed(None, now) {
            self.auto_pause();
        }
    }

    /// Handle a scheduler wake-up for timer `id`. Stale or cancelled timers
    /// are ignored.
    pub fn on_timer_expired(&mut self, id: u64, now: Instant) {
        if self.no_hands_elapsed(Some(id), now) {
            self.auto_pause();
        } else {
            debug!("Ignoring stale no-hands timer {}", id);
        }
    }

    fn try_calibrate(&mut self) -> bool {
        let (Some(left), Some(right)) = (self.present[Chirality::Left], self.present[Chirality::Right]) else {
            return false;
        };

        info!("Calibrated baselines: left {:.4}, right {:.4}", left, right);
        self.baselines[Chirality::Left] = Some(left);
        self.baselines[Chirality::Right] = Some(right);
        self.pitch.snap(NEUTRAL_PITCH);
        self.speed.snap(NEUTRAL_SPEED);
        self.phase = Phase::Playing { no_hands: None };
        self.sink.play();
        true
    }

    fn update_playing(&mut self, now: Instant) {
        if self.present.is_empty() {
            self.baselines.clear();
            self.arm_no_hands_timer(now);
            return;
        }

        if let Phase::Playing { no_hands } = &mut self.phase {
            if let Some(timer) = no_hands.take() {
                debug!("Hands returned, cancelling no-hands timer {}", timer.id());
                timer.cancel();
            }
        }

        for hand in Chirality::ALL {
            match self.present[hand] {
                None => self.baselines[hand] = None,
                Some(distance) => {
                    let baseline = match self.baselines[hand] {
                        Some(baseline) => baseline,
                        None => {
                            info!("{:?} hand re-acquired, rebalancing at {:.4}", hand, distance);
                            self.rebalance_hand(hand, distance);
                            distance
                        }
                    };
                    self.drive(hand, distance - baseline);
                }
            }
        }
    }

    fn arm_no_hands_timer(&mut self, now: Instant) {
        let Phase::Playing { no_hands } = &mut self.phase else {
            return;
        };
        if no_hands.is_some() {
            return;
        }

        let timer = NoHandsTimer::start(now, self.config.no_hands_delay());
        debug!("Both hands absent, no-hands timer {} armed for {:.1}s", timer.id(), self.config.no_hands_delay_secs);
        if let Some(scheduler) = &self.scheduler {
            scheduler.schedule(timer.handle());
        }
        *no_hands = Some(timer);
    }

    fn no_hands_elapsed(&self, id: Option<u64>, now: Instant) -> bool {
        match &self.phase {
            Phase::Playing { no_hands: Some(timer) } => {
                id.map_or(true, |id| id == timer.id()) && timer.has_elapsed(now) && self.present.is_empty()
            }
            _ => false,
        }
    }

    fn auto_pause(&mut self) {
        info!("No hands for {:.1}s, pausing", self.config.no_hands_delay_secs);
        self.sink.pause();
        self.baselines.clear();
        self.phase = Phase::Idle;
    }

    /// Map a distance delta for `hand` to its parameter and emit it
    fn drive(&mut self, hand: Chirality, delta: f64) {
        match hand {
            Chirality::Left => {
                let target = pitch_target(delta, self.config.sensitivity, self.config.pitch_limit_cents);
                let cents = self.pitch.step(target);
                debug!("pitch target {:+.1}, current {:+.1}", target, cents);
                self.sink.set_pitch(cents);
            }
            Chirality::Right => {
                let target = speed_target(delta, self.config.sensitivity);
                let multiplier = self.speed.step(target).clamp(MIN_SPEED, MAX_SPEED);
                self.speed.snap(multiplier);
                debug!("speed target {:.3}, current {:.3}", target, multiplier);
                self.sink.set_speed(multiplier);
            }
        }
    }

    fn rebalance_hand(&mut self, hand: Chirality, distance: f64) {
        self.baselines[hand] = Some(distance);
        match hand {
            Chirality::Left => self.pitch.snap(NEUTRAL_PITCH),
            Chirality::Right => self.speed.snap(NEUTRAL_SPEED),
        }
    }

    // ── User intents ────────────────────────────────────────────────────────

    pub fn handle_intent(&mut self, intent: UserIntent) {
        match intent {
            UserIntent::LoadTrack { title } => self.load_track(title),
            UserIntent::TogglePlayPause => self.toggle_play_pause(),
            UserIntent::Restart => self.restart(),
            UserIntent::Rebalance => self.rebalance(),
            UserIntent::CycleSensitivity => self.cycle_sensitivity(),
            UserIntent::CycleSmoothing => self.cycle_smoothing(),
            UserIntent::CycleNoHandsDelay => self.cycle_no_hands_delay(),
        }
    }

    /// A new track was loaded: reset to neutral and wait for calibration
    pub fn load_track(&mut self, title: impl Into<String>) {
        let title = title.into();
        info!("Loaded track '{}', waiting for calibration", title);
        if self.is_playing() {
            self.sink.pause();
        }
        self.track_title = Some(title);
        self.baselines.clear();
        self.reset_parameters();
        self.phase = Phase::Calibrating;
    }

    /// Pause if playing, otherwise resume the loaded track
    pub fn toggle_play_pause(&mut self) {
        if self.is_playing() {
            info!("Paused by user");
            self.sink.pause();
            self.phase = Phase::Idle;
        } else if self.is_track_loaded() {
            info!("Resumed by user");
            self.sink.play();
            self.phase = Phase::Playing { no_hands: None };
        } else {
            debug!("Play requested with no track loaded");
        }
    }

    /// Return both parameters to neutral and restart the track
    pub fn restart(&mut self) {
        if !self.is_track_loaded() {
            debug!("Restart requested with no track loaded");
            return;
        }
        info!("Restarting track");
        self.sink.restart();
        self.reset_parameters();
    }

    /// Re-baseline every hand seen in the last frame; others keep their state
    pub fn rebalance(&mut self) {
        for hand in Chirality::ALL {
            if let Some(distance) = self.present[hand] {
                info!("{:?} hand rebalanced at {:.4}", hand, distance);
                self.rebalance_hand(hand, distance);
                match hand {
                    Chirality::Left => self.sink.set_pitch(NEUTRAL_PITCH),
                    Chirality::Right => self.sink.set_speed(NEUTRAL_SPEED),
                }
            }
        }
    }

    pub fn cycle_sensitivity(&mut self) {
        self.config.sensitivity = self.config.sensitivity.cycle();
        info!("Sensitivity: {}", self.config.sensitivity);
    }

    pub fn cycle_smoothing(&mut self) {
        let smoothing = next_option(&SMOOTHING_OPTIONS, self.config.smoothing);
        self.config.smoothing = smoothing;
        self.pitch.set_alpha(smoothing);
        self.speed.set_alpha(smoothing);
        info!("Smoothing: {:.2}", smoothing);
    }

    /// Takes effect the next time the timer is armed
    pub fn cycle_no_hands_delay(&mut self) {
        self.config.no_hands_delay_secs = next_option(&NO_HANDS_DELAY_OPTIONS, self.config.no_hands_delay_secs);
        info!("No-hands delay: {:.1}s", self.config.no_hands_delay_secs);
    }

    fn reset_parameters(&mut self) {
        self.pitch.snap(NEUTRAL_PITCH);
        self.speed.snap(NEUTRAL_SPEED);
        self.sink.set_pitch(NEUTRAL_PITCH);
        self.sink.set_speed(NEUTRAL_SPEED);
    }
}

fn assert_valid(config: &ControlConfig) {
    if let Err(e) = config.validate() {
        panic!("Invalid control settings: {}", e);
    }
}

/// Thumb-index distance per hand present in the frame
fn pinch_distances(hands: &[FilteredLandmarks]) -> PerHand<Option<f64>> {
    by_chirality(hands).map(|hand| hand.map(|h| h.pinch_distance()))
}

/// Entry after `current` in `options`, or the first entry if not found
fn next_option(options: &[f64], current: f64) -> f64 {
    options
        .iter()
        .position(|&o| (o - current).abs() < EPSILON)
        .map_or(options[0], |i| options[(i + 1) % options.len()])
}
