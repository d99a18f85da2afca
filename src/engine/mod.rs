//! Timing core shared by the sequencer and the clipboard flags.
//!
//! Everything that "waits" in this crate is a deadline on a [`TimerQueue`]
//! measured in [`ShowTime`]. Nothing blocks; hosts drive the queues forward
//! by reporting the current time.

pub mod clock;
pub mod scheduler;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use clock::ShowClock;
pub use scheduler::{ScheduledTimer, TimerQueue};

/// Point on the showcase's logical time axis.
///
/// Fixed-point nanoseconds since the owner's epoch (usually the moment the
/// host started driving it), so that schedule arithmetic is exact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct ShowTime {
    nanos: u64,
}

impl ShowTime {
    /// The epoch.
    pub const ZERO: Self = Self { nanos: 0 };

    /// Create a time from whole milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis.saturating_mul(1_000_000),
        }
    }

    /// Create a time from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Create a time from an elapsed [`Duration`], saturating at `u64::MAX` nanos.
    #[must_use]
    pub fn from_duration(elapsed: Duration) -> Self {
        Self {
            nanos: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    /// Whole milliseconds, rounded down.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.nanos / 1_000_000
    }

    /// Nanoseconds.
    #[must_use]
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Convert to a [`Duration`].
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        Duration::from_nanos(self.nanos)
    }

    /// Shift forward by `millis`.
    #[must_use]
    pub const fn add_millis(self, millis: u64) -> Self {
        Self {
            nanos: self.nanos.saturating_add(millis.saturating_mul(1_000_000)),
        }
    }
}

impl std::ops::Add for ShowTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            nanos: self.nanos.saturating_add(rhs.nanos),
        }
    }
}

impl std::ops::Sub for ShowTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            nanos: self.nanos.saturating_sub(rhs.nanos),
        }
    }
}

impl std::fmt::Display for ShowTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:03}s", self.nanos / 1_000_000_000, self.as_millis() % 1000)
    }
}
