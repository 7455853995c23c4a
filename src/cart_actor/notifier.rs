//! The transient "item added" flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Two-state flag that turns on when pulsed and back off after `hold`.
///
/// Every pulse schedules its own reset on a detached tokio task. Resets are
/// never cancelled, so a reset scheduled by an earlier pulse may turn the flag
/// off while a later pulse is still within its hold time. Nothing reads the
/// flag to make a decision; it only drives presentation.
#[derive(Debug, Clone)]
pub struct Notifier {
    active: Arc<AtomicBool>,
    hold: Duration,
}

impl Notifier {
    pub fn new(hold: Duration) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
            hold,
        }
    }

    /// Turns the flag on and schedules it off. Must run inside a tokio runtime.
    pub fn pulse(&self) {
        self.active.store(true, Ordering::Release);
        let active = self.active.clone();
        let deadline = tokio::time::Instant::now() + self.hold;
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            active.store(false, Ordering::Release);
        });
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }
}
