//! Recorded traces of detector frames and user intents, and their replay.
//!
//! A trace is a YAML document listing events with millisecond offsets:
//!
//! ```yaml
//! events:
//!   - type: intent
//!     at_ms: 0
//!     intent: { action: load_track, title: "demo" }
//!   - type: frame
//!     at_ms: 33
//!     hands:
//!       - chirality: left
//!         thumb_tip: { location: { x: 0.40, y: 0.50 }, confidence: 0.9 }
//!         index_tip: { location: { x: 0.40, y: 0.60 }, confidence: 0.9 }
//! ```
//!
//! Replay runs on virtual time, so a trace gives the same sink commands on
//! every run regardless of machine speed.

use crate::{
    controller::{GestureController, UserIntent},
    landmark_filter::LandmarkFilter,
    types::HandObservation,
    Error, Result,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

/// One recorded event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    Frame {
        at_ms: u64,
        #[serde(default)]
        hands: Vec<HandObservation>,
    },
    Intent {
        at_ms: u64,
        intent: UserIntent,
    },
}

impl TraceEvent {
    /// Offset from the start of the trace
    pub const fn at(&self) -> Duration {
        match self {
            Self::Frame { at_ms, .. } | Self::Intent { at_ms, .. } => Duration::from_millis(*at_ms),
        }
    }
}

/// A sequence of events in non-decreasing time order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

impl Trace {
    /// Parse and validate a trace from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        let trace: Self = serde_yaml::from_str(content)?;
        trace.validate()?;
        Ok(trace)
    }

    /// Load a trace from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Check that timestamps never go backwards and every coordinate is finite
    pub fn validate(&self) -> Result<()> {
        for (i, event) in self.events.iter().enumerate() {
            if let TraceEvent::Frame { hands, .. } = event {
                if !hands.iter().all(HandObservation::is_finite) {
                    return Err(Error::InvalidInput(format!("event {} has a non-finite landmark", i)));
                }
            }
        }
        for (i, pair) in self.events.windows(2).enumerate() {
            if pair[1].at() < pair[0].at() {
                return Err(Error::TraceError(format!(
                    "event {} at {:?} precedes event {} at {:?}",
                    i + 1,
                    pair[1].at(),
                    i,
                    pair[0].at()
                )));
            }
        }
        Ok(())
    }

    /// Offset of the last event
    pub fn duration(&self) -> Duration {
        self.events.last().map_or(Duration::ZERO, TraceEvent::at)
    }
}

/// Counts of what a replay fed through the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub intents: usize,
}

/// Feed every event of `trace` through the filter and controller, treating
/// `start` as offset zero. The controller's timer is checked before each event
/// and once more at `start + trace.duration() + settle`.
pub fn replay(
    trace: &Trace,
    filter: &mut LandmarkFilter,
    controller: &mut GestureController,
    start: Instant,
    settle: Duration,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for event in &trace.events {
        let now = start + event.at();
        controller.tick(now);
        match event {
            TraceEvent::Frame { hands, .. } => {
                let filtered = filter.update(hands);
                debug!("t={:?}: {} observed, {} kept", event.at(), hands.len(), filtered.len());
                controller.process_frame(&filtered, now);
                summary.frames += 1;
            }
            TraceEvent::Intent { intent, .. } => {
                debug!("t={:?}: {:?}", event.at(), intent);
                controller.handle_intent(intent.clone());
                summary.intents += 1;
            }
        }
    }

    controller.tick(start + trace.duration() + settle);
    summary
}
