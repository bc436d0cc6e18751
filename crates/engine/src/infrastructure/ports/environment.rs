//! Time and entropy, injected so tests can pin them.

use chrono::{DateTime, Utc};

/// Source of timestamps for transcripts, reveals, verdicts and idle tracking.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// Seed for a case when the player did not pick one.
    fn next_seed(&self) -> u64;
}
