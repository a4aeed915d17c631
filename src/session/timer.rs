//! Countdowns for timed games.
//!
//! A `Countdown` is advanced only by `Session::on_tick`. A `TimerDriver`
//! turns an injected [`Clock`] into those ticks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::machine::Session;
use crate::core::{Clock, Deadline};

/// Urgency level of a running countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Heat {
    /// More than half the time left.
    Calm,
    /// More than a quarter left.
    Warm,
    /// More than a tenth left.
    Hot,
    /// A tenth or less left.
    Critical,
}

/// Remaining time of a timed phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
}

impl Countdown {
    #[must_use]
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            remaining: total,
        }
    }

    #[must_use]
    pub fn from_secs(seconds: u32) -> Self {
        Self::new(Duration::from_secs(u64::from(seconds)))
    }

    /// Consume `elapsed`. Returns `true` on the tick that reaches zero.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.remaining.is_zero() {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.remaining.is_zero()
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        self.total
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    #[must_use]
    pub fn heat(&self) -> Heat {
        if self.total.is_zero() {
            return Heat::Critical;
        }
        let left = self.remaining.as_secs_f64() / self.total.as_secs_f64();
        if left > 0.5 {
            Heat::Calm
        } else if left > 0.25 {
            Heat::Warm
        } else if left > 0.10 {
            Heat::Hot
        } else {
            Heat::Critical
        }
    }
}

/// Feeds a session with ticks measured on a clock.
#[derive(Clone, Debug)]
pub struct TimerDriver<C: Clock> {
    clock: C,
    last: Duration,
}

impl<C: Clock> TimerDriver<C> {
    /// Start measuring from the clock's current time.
    pub fn new(clock: C) -> Self {
        let last = clock.now();
        Self { clock, last }
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Deliver the time passed since the last poll.
    pub fn poll(&mut self, session: &mut Session) -> Duration {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last);
        self.last = now;
        session.on_tick(elapsed);
        elapsed
    }

    /// When the session's countdown will run out, if one is running.
    #[must_use]
    pub fn deadline(&self, session: &Session) -> Option<Deadline> {
        session
            .countdown()
            .filter(|c| !c.is_expired())
            .map(|c| self.clock.schedule_after(c.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_expires_once() {
        let mut countdown = Countdown::from_secs(10);
        assert!(!countdown.tick(Duration::from_secs(4)));
        assert_eq!(countdown.remaining(), Duration::from_secs(6));
        assert!(countdown.tick(Duration::from_secs(7)));
        assert!(countdown.is_expired());
        assert!(!countdown.tick(Duration::from_secs(1)));
    }

    #[test]
    fn test_heat_levels() {
        let mut countdown = Countdown::from_secs(100);
        assert_eq!(countdown.heat(), Heat::Calm);
        countdown.tick(Duration::from_secs(60));
        assert_eq!(countdown.heat(), Heat::Warm);
        countdown.tick(Duration::from_secs(20));
        assert_eq!(countdown.heat(), Heat::Hot);
        countdown.tick(Duration::from_secs(15));
        assert_eq!(countdown.heat(), Heat::Critical);
    }

    #[test]
    fn test_zero_length_countdown() {
        let countdown = Countdown::from_secs(0);
        assert!(countdown.is_expired());
        assert_eq!(countdown.heat(), Heat::Critical);
    }
}
