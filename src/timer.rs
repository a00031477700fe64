//! Cancellable one-shot deadline for the both-hands-absent debounce.
//!
//! A [`NoHandsTimer`] is a monotonic deadline plus a shared cancel flag. The
//! controller owns the timer; a [`TimerScheduler`] may receive a
//! [`TimerHandle`] to wake the controller when the deadline passes. Expiry is
//! only acted on after the controller re-checks the flag, the id and its own
//! state, so a wake-up that races with cancellation is harmless.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Armed debounce timer
#[derive(Debug)]
pub struct NoHandsTimer {
    id: u64,
    deadline: Instant,
    cancelled: Arc<AtomicBool>,
}

impl NoHandsTimer {
    /// Arm a timer that elapses `delay` after `now`
    #[must_use]
    pub fn start(now: Instant, delay: Duration) -> Self {
        Self {
            id: NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed),
            deadline: now + delay,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub const fn id(&self) -> u64 {
        self.id
    }

    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Mark the timer cancelled; any outstanding handle observes this
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// True once `now` has reached the deadline and the timer is still live
    pub fn has_elapsed(&self, now: Instant) -> bool {
        !self.is_cancelled() && now >= self.deadline
    }

    /// Handle for a scheduler to wait on
    #[must_use]
    pub fn handle(&self) -> TimerHandle {
        TimerHandle {
            id: self.id,
            deadline: self.deadline,
            cancelled: Arc::clone(&self.cancelled),
        }
    }
}

impl Drop for NoHandsTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Scheduler-side view of an armed timer
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: u64,
    deadline: Instant,
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub const fn id(&self) -> u64 {
        self.id
    }

    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Something that can wake the controller when a timer's deadline passes
pub trait TimerScheduler: Send {
    /// Arrange for an expiry notification carrying `handle.id()`
    fn schedule(&self, handle: TimerHandle);
}
