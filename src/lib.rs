//! Gesture control core for hand-driven audio playback.
//!
//! This library turns per-frame hand landmark detections (thumb and index
//! tips of each hand) into two continuous audio parameters and a play state:
//! - the left hand's pinch distance drives pitch, in cents
//! - the right hand's pinch distance drives playback speed
//! - both hands leaving the frame pauses playback after a debounce
//!
//! The pipeline consists of:
//! 1. Confidence gating and jump-aware smoothing of the landmarks
//! 2. Baseline calibration, with automatic rebalancing when a hand returns
//! 3. Mapping distance deltas to pitch and speed through a sensitivity level
//! 4. A second smoothing stage before commands reach the audio sink
//!
//! # Examples
//!
//! ## Driving the pipeline frame by frame
//!
//! ```
//! use gesture_flow::{
//!     config::Config,
//!     controller::GestureController,
//!     landmark_filter::LandmarkFilter,
//!     sink::RecordingSink,
//!     types::{Chirality, HandObservation, Keypoint},
//! };
//! use std::time::Instant;
//!
//! let config = Config::default();
//! let sink = RecordingSink::new();
//! let mut filter = LandmarkFilter::new(config.filter.clone());
//! let mut controller = GestureController::new(config.control.clone(), Box::new(sink.clone()));
//!
//! controller.load_track("demo");
//!
//! let pinch = |chirality: Chirality, gap: f64| {
//!     HandObservation::pinch(chirality, Keypoint::new(0.5, 0.5, 0.9), Keypoint::new(0.5, 0.5 + gap, 0.9))
//! };
//! let hands = filter.update(&[pinch(Chirality::Left, 0.1), pinch(Chirality::Right, 0.1)]);
//! controller.process_frame(&hands, Instant::now());
//!
//! assert!(controller.is_playing());
//! ```
//!
//! ## Running on a worker thread
//!
//! ```no_run
//! use gesture_flow::{config::Config, controller::UserIntent, session::Session, sink::LogSink};
//!
//! # fn main() -> gesture_flow::Result<()> {
//! let session = Session::spawn(Config::default(), Box::new(LogSink))?;
//! session.send_intent(UserIntent::LoadTrack { title: "demo".to_string() })?;
//! // ... session.submit_frame(observations)? for every camera frame ...
//! println!("playing: {}", session.snapshot().is_playing);
//! session.shutdown()?;
//! # Ok(())
//! # }
//! ```

/// Hand, landmark and point types
pub mod types;

/// Signal filtering algorithms for landmarks and control values
pub mod filters;

/// Per-hand landmark smoothing with confidence gating
pub mod landmark_filter;

/// Pinch-distance to pitch/speed mapping and sensitivity levels
pub mod mapping;

/// Cancellable no-hands debounce timer
pub mod timer;

/// Audio sink interface
pub mod sink;

/// Calibration and play/pause state machine
pub mod controller;

/// Worker-thread session
pub mod session;

/// Recorded traces and their replay
pub mod trace;

/// Error types and result handling
pub mod error;

/// Constants used throughout the pipeline
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
