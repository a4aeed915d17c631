//! Logical clock for timed games.
//!
//! The engine never reads wall time itself. A `Clock` is injected by the
//! caller; tests use [`ManualClock`] to step time deterministically.

use std::time::{Duration, Instant};

/// A point on a clock's timeline at which something should fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline {
    pub at: Duration,
}

impl Deadline {
    /// Has this deadline passed at time `now`?
    #[must_use]
    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.at
    }

    /// Time left until the deadline, saturating at zero.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Duration {
        self.at.saturating_sub(now)
    }
}

/// Source of logical time.
pub trait Clock {
    /// Time since the clock's origin.
    fn now(&self) -> Duration;

    /// Deadline `delay` after the current time.
    fn schedule_after(&self, delay: Duration) -> Deadline {
        Deadline {
            at: self.now() + delay,
        }
    }
}

/// Wall clock anchored at construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_schedule() {
        let mut clock = ManualClock::new();
        let deadline = clock.schedule_after(Duration::from_secs(10));
        assert!(!deadline.is_due(clock.now()));

        clock.advance(Duration::from_secs(4));
        assert_eq!(deadline.remaining(clock.now()), Duration::from_secs(6));

        clock.advance(Duration::from_secs(6));
        assert!(deadline.is_due(clock.now()));
        assert_eq!(deadline.remaining(clock.now()), Duration::ZERO);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
