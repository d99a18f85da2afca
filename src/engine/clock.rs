//! Logical clock for driving timer queues.
//!
//! Supports two driving styles:
//! - Fixed ticks (headless playback, tests)
//! - Wall-clock samples via [`ShowClock::set_time`] (interactive front ends)

use crate::engine::ShowTime;

/// Monotonic logical clock.
#[derive(Debug, Clone)]
pub struct ShowClock {
    /// Current time.
    current: ShowTime,
    /// Tick width in nanoseconds.
    tick_nanos: u64,
}

impl ShowClock {
    /// Create a clock that advances `tick_millis` per tick.
    #[must_use]
    pub const fn from_millis(tick_millis: u64) -> Self {
        Self::from_nanos(tick_millis.saturating_mul(1_000_000))
    }

    /// Create a clock that advances `tick_nanos` per tick.
    #[must_use]
    pub const fn from_nanos(tick_nanos: u64) -> Self {
        Self {
            current: ShowTime::ZERO,
            tick_nanos,
        }
    }

    /// Current time.
    #[must_use]
    pub const fn now(&self) -> ShowTime {
        self.current
    }

    /// Advance by one tick and return the new time.
    pub fn tick(&mut self) -> ShowTime {
        self.current = self.current + ShowTime::from_nanos(self.tick_nanos);
        self.current
    }

    /// Move to a sampled time. Samples earlier than the current time are
    /// ignored so the clock never runs backwards.
    pub fn set_time(&mut self, time: ShowTime) -> ShowTime {
        if time > self.current {
            self.current = time;
        }
        self.current
    }
}
