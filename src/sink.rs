//! Audio sink interface and the stock sinks.
//!
//! Commands are fire-and-forget. Any thread hopping the real audio engine
//! needs happens behind the trait.

use log::info;
use std::sync::{Arc, Mutex};

/// Receiver of playback and DSP commands
pub trait AudioSink: Send {
    fn play(&mut self);
    fn pause(&mut self);
    /// Restart the loaded track from its beginning
    fn restart(&mut self);
    /// Pitch offset in cents
    fn set_pitch(&mut self, cents: f64);
    /// Playback speed multiplier
    fn set_speed(&mut self, multiplier: f64);
}

/// A command as issued to a sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkCommand {
    Play,
    Pause,
    Restart,
    SetPitch(f64),
    SetSpeed(f64),
}

/// Sink that records every command; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    commands: Arc<Mutex<Vec<SinkCommand>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every command received so far
    pub fn commands(&self) -> Vec<SinkCommand> {
        self.lock().clone()
    }

    /// Remove and return every command received so far
    pub fn take(&self) -> Vec<SinkCommand> {
        std::mem::take(&mut *self.lock())
    }

    fn push(&self, command: SinkCommand) {
        self.lock().push(command);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SinkCommand>> {
        // A poisoned log is still a valid Vec
        self.commands.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self) {
        self.push(SinkCommand::Play);
    }

    fn pause(&mut self) {
        self.push(SinkCommand::Pause);
    }

    fn restart(&mut self) {
        self.push(SinkCommand::Restart);
    }

    fn set_pitch(&mut self, cents: f64) {
        self.push(SinkCommand::SetPitch(cents));
    }

    fn set_speed(&mut self, multiplier: f64) {
        self.push(SinkCommand::SetSpeed(multiplier));
    }
}

/// Sink that writes every command to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self) {
        info!("sink: play");
    }

    fn pause(&mut self) {
        info!("sink: pause");
    }

    fn restart(&mut self) {
        info!("sink: restart");
    }

    fn set_pitch(&mut self, cents: f64) {
        info!("sink: pitch {:+.1} cents", cents);
    }

    fn set_speed(&mut self, multiplier: f64) {
        info!("sink: speed {:.3}x", multiplier);
    }
}
