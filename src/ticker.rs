//! Periodic tick sources.
//!
//! The universe never looks at a clock. It asks its [`TickSource`] to start or
//! stop repeating, and the host loop polls the source to learn when a
//! generation is due.

use std::time::{Duration, Instant};

pub trait TickSource {
    /// Begins repeating every `interval`. The first tick is due immediately.
    fn schedule(&mut self, interval: Duration);

    /// Stops repeating. Pending ticks are dropped.
    fn cancel(&mut self);

    /// Consumes one due tick, if any.
    fn take_due(&mut self) -> bool;

    /// How long the host may wait before the next tick, or `None` when idle.
    fn until_next(&self) -> Option<Duration>;
}

/// Wall-clock tick source for interactive hosts.
#[derive(Debug, Default)]
pub struct IntervalTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    /// Creates an idle timer; nothing fires until [`TickSource::schedule`].
    pub fn new() -> Self {
        Self::default()
    }

    /// True between `schedule` and `cancel`.
    pub fn is_scheduled(&self) -> bool {
        self.next_due.is_some()
    }

    fn take_due_at(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    fn until_next_at(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.checked_duration_since(now).unwrap_or(Duration::ZERO))
    }
}

impl TickSource for IntervalTimer {
    fn schedule(&mut self, interval: Duration) {
        self.interval = interval;
        self.next_due = Some(Instant::now());
    }

    fn cancel(&mut self) {
        self.next_due = None;
    }

    fn take_due(&mut self) -> bool {
        self.take_due_at(Instant::now())
    }

    fn until_next(&self) -> Option<Duration> {
        self.until_next_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = IntervalTimer::new();
        assert!(!timer.take_due());
        assert_eq!(timer.until_next(), None);
    }

    #[test]
    fn test_first_tick_is_immediate() {
        let mut timer = IntervalTimer::new();
        timer.schedule(Duration::from_secs(60));
        assert!(timer.is_scheduled());
        assert!(timer.take_due());
        assert!(!timer.take_due());
    }

    #[test]
    fn test_repeats_after_interval() {
        let mut timer = IntervalTimer::new();
        timer.schedule(Duration::from_millis(100));
        let start = Instant::now();
        assert!(timer.take_due_at(start));

        let remaining = timer.until_next_at(start).unwrap();
        assert!(remaining <= Duration::from_millis(100));
        assert!(!timer.take_due_at(start + Duration::from_millis(10)));
        assert!(timer.take_due_at(start + Duration::from_millis(500)));
        assert_eq!(timer.until_next_at(start + Duration::from_secs(5)), Some(Duration::ZERO));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut timer = IntervalTimer::new();
        timer.schedule(Duration::from_millis(100));
        timer.cancel();
        assert!(!timer.is_scheduled());
        assert!(!timer.take_due());
    }
}
