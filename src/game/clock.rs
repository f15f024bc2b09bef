//! Single-slot timer bookkeeping.
//!
//! The engine never sleeps itself. It records at most one pending callback here and the
//! driver (a tokio loop, or a test) decides when to fire it. Arming a new callback replaces
//! the old one, and cancelling clears the slot; either way a stale firing is recognised by
//! its id and dropped.

use std::time::Duration;

/// What should happen when the pending timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    /// Advance the simulation by one tick
    Frame,
    /// Remove one tail segment of the dead snake
    ShrinkTail,
    /// Bring the snake back and return to Ready
    Resurrect,
}

/// A callback waiting in the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub id: u64,
    pub wakeup: Wakeup,
    pub delay: Duration,
    /// Fixed-interval timers stay armed after firing
    pub repeating: bool,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Option<Scheduled>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `wakeup` every `period` until cancelled
    pub fn set_interval(&mut self, wakeup: Wakeup, period: Duration) -> u64 {
        self.arm(wakeup, period, true)
    }

    /// Fire `wakeup` once after `delay`
    pub fn set_timeout(&mut self, wakeup: Wakeup, delay: Duration) -> u64 {
        self.arm(wakeup, delay, false)
    }

    fn arm(&mut self, wakeup: Wakeup, delay: Duration, repeating: bool) -> u64 {
        self.next_id += 1;
        self.pending = Some(Scheduled {
            id: self.next_id,
            wakeup,
            delay,
            repeating,
        });
        self.next_id
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<Scheduled> {
        self.pending
    }

    /// Claim the callback with `id` for running. One-shot timers are cleared;
    /// returns None if `id` was cancelled or replaced in the meantime.
    pub fn take(&mut self, id: u64) -> Option<Wakeup> {
        let scheduled = self.pending.filter(|s| s.id == id)?;
        if !scheduled.repeating {
            self.pending = None;
        }
        Some(scheduled.wakeup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_stays_armed() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.set_interval(Wakeup::Frame, Duration::from_millis(100));

        assert_eq!(scheduler.take(id), Some(Wakeup::Frame));
        assert_eq!(scheduler.take(id), Some(Wakeup::Frame));
        assert_eq!(scheduler.pending().map(|s| s.id), Some(id));
    }

    #[test]
    fn test_timeout_fires_once() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.set_timeout(Wakeup::ShrinkTail, Duration::from_millis(25));

        assert_eq!(scheduler.take(id), Some(Wakeup::ShrinkTail));
        assert_eq!(scheduler.take(id), None);
        assert!(scheduler.pending().is_none());
    }

    #[test]
    fn test_cancel_drops_stale_firing() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.set_interval(Wakeup::Frame, Duration::from_millis(100));
        scheduler.cancel();

        assert_eq!(scheduler.take(id), None);
    }

    #[test]
    fn test_rearm_replaces_pending() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.set_interval(Wakeup::Frame, Duration::from_millis(100));
        let second = scheduler.set_timeout(Wakeup::Resurrect, Duration::from_secs(1));

        assert_ne!(first, second);
        assert_eq!(scheduler.take(first), None);
        assert_eq!(scheduler.take(second), Some(Wakeup::Resurrect));
    }
}
