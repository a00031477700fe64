//! Threaded session: one worker owns the landmark filter and the controller.
//!
//! Frames, user intents and timer wake-ups all arrive on one channel, so they
//! are processed strictly one after another. The no-hands timer sleeps on its
//! own thread and posts back into the same channel; the controller decides
//! on the worker whether that wake-up still matters.

use crate::{
    config::Config,
    controller::{ControlSnapshot, GestureController, UserIntent},
    landmark_filter::LandmarkFilter,
    sink::AudioSink,
    timer::{TimerHandle, TimerScheduler},
    types::HandObservation,
    Error, Result,
};
use log::{debug, info, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Work item for the session worker
#[derive(Debug)]
pub enum SessionEvent {
    /// Detector output for one camera frame, captured at `at`
    Frame { hands: Vec<HandObservation>, at: Instant },
    Intent(UserIntent),
    /// The no-hands timer with this id reached its deadline
    TimerExpired(u64),
    Shutdown,
}

/// Sleeps on a helper thread and posts [`SessionEvent::TimerExpired`]
struct ThreadScheduler {
    tx: Sender<SessionEvent>,
}

impl TimerScheduler for ThreadScheduler {
    fn schedule(&self, handle: TimerHandle) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            thread::sleep(handle.deadline().saturating_duration_since(Instant::now()));
            if handle.is_cancelled() {
                return;
            }
            // The worker may already be gone
            let _ = tx.send(SessionEvent::TimerExpired(handle.id()));
        });
    }
}

/// Handle to a running gesture session
pub struct Session {
    tx: Sender<SessionEvent>,
    snapshot: Arc<RwLock<ControlSnapshot>>,
    worker: Option<JoinHandle<()>>,
}

impl Session {
    /// Validate `config` and start the worker thread
    pub fn spawn(config: Config, sink: Box<dyn AudioSink>) -> Result<Self> {
        config.validate()?;

        let (tx, rx) = mpsc::channel();
        let filter = LandmarkFilter::new(config.filter);
        let controller = GestureController::new(config.control, sink)
            .with_scheduler(Box::new(ThreadScheduler { tx: tx.clone() }));
        let snapshot = Arc::new(RwLock::new(controller.snapshot()));

        let published = Arc::clone(&snapshot);
        let worker = thread::Builder::new()
            .name("gesture-session".to_string())
            .spawn(move || run(rx, filter, controller, &published))?;

        info!("Gesture session started");
        Ok(Self {
            tx,
            snapshot,
            worker: Some(worker),
        })
    }

    /// Queue a frame observed now
    pub fn submit_frame(&self, hands: Vec<HandObservation>) -> Result<()> {
        self.submit_frame_at(hands, Instant::now())
    }

    /// Queue a frame captured at `at`
    pub fn submit_frame_at(&self, hands: Vec<HandObservation>, at: Instant) -> Result<()> {
        self.send(SessionEvent::Frame { hands, at })
    }

    pub fn send_intent(&self, intent: UserIntent) -> Result<()> {
        self.send(SessionEvent::Intent(intent))
    }

    /// State published after the most recently processed event
    pub fn snapshot(&self) -> ControlSnapshot {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Stop the worker after it drains queued events
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn send(&self, event: SessionEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| Error::SessionClosed)
    }

    fn stop(&mut self) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        // A dead worker has already dropped its receiver
        let _ = self.tx.send(SessionEvent::Shutdown);
        worker.join().map_err(|_| Error::SessionClosed)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("Gesture session worker did not stop cleanly: {}", e);
        }
    }
}

fn run(
    rx: Receiver<SessionEvent>,
    mut filter: LandmarkFilter,
    mut controller: GestureController,
    published: &RwLock<ControlSnapshot>,
) {
    while let Ok(event) = rx.recv() {
        match event {
            SessionEvent::Frame { hands, at } => {
                let filtered = filter.update(&hands);
                controller.process_frame(&filtered, at);
            }
            SessionEvent::Intent(intent) => {
                debug!("Intent: {:?}", intent);
                controller.handle_intent(intent);
            }
            SessionEvent::TimerExpired(id) => controller.on_timer_expired(id, Instant::now()),
            SessionEvent::Shutdown => break,
        }

        *published.write().unwrap_or_else(PoisonError::into_inner) = controller.snapshot();
    }
    info!("Gesture session stopped");
}
