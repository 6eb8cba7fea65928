//! Deterministic clock abstraction for testable time-dependent logic.

use chrono::{DateTime, NaiveDate, Utc};

/// Clock trait for deterministic time in tests.
pub trait Clock: Send + Sync {
    /// Get the current UTC time.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Get the current UTC date.
    ///
    /// License expiration is date-granular: an account expiring today is
    /// still valid for the whole of today.
    fn today_utc(&self) -> NaiveDate {
        self.now_utc().date_naive()
    }
}

/// System clock using actual wall time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Mock clock for deterministic testing.
#[cfg(any(test, feature = "test-seams"))]
#[derive(Debug, Clone)]
pub struct MockClock {
    now: DateTime<Utc>,
}

#[cfg(any(test, feature = "test-seams"))]
impl MockClock {
    /// Create a mock clock frozen at the given time.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Create a mock clock from an RFC 3339 string.
    pub fn from_rfc3339(s: &str) -> Self {
        Self {
            now: DateTime::parse_from_rfc3339(s)
                .expect("valid RFC 3339")
                .with_timezone(&Utc),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&mut self, duration: chrono::Duration) {
        self.now = self.now + duration;
    }
}

#[cfg(any(test, feature = "test-seams"))]
impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }
}
