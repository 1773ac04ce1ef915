//! Mock clock for testing.

use crate::application::ports::Clock;
use chrono::{Duration, NaiveDate};
use std::sync::{Arc, Mutex};

/// Mock clock for testing.
///
/// Allows tests to pin or advance the current date explicitly, enabling
/// deterministic assertions on record creation dates.
///
/// # Thread Safety
///
/// `MockClock` is thread-safe and can be cloned to share across threads.
/// All clones share the same underlying date, so advancing the date in one
/// clone affects all clones.
#[derive(Debug, Clone)]
pub struct MockClock {
    current_date: Arc<Mutex<NaiveDate>>,
}

impl MockClock {
    /// Create a mock clock pinned to a specific date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            current_date: Arc::new(Mutex::new(date)),
        }
    }

    /// Advance the clock by a number of days.
    pub fn advance_days(&self, days: i64) {
        let mut date = self
            .current_date
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *date += Duration::days(days);
    }

    /// Set the clock to a specific date.
    pub fn set(&self, date: NaiveDate) {
        let mut current = self
            .current_date
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *current = date;
    }
}

impl Clock for MockClock {
    fn today(&self) -> NaiveDate {
        *self
            .current_date
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
    }
}
