//! Wall-clock source used for token expiry.

use std::fmt;

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// The manager consults its clock when a token is issued and whenever it
/// checks token freshness. Tests substitute a clock they can advance.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
