//! Clock adapters for date operations.
//!
//! Provides SystemClock for production use.
//!
//! # Testing
//!
//! See `MockClock` (in `crate::infrastructure::mocks`) for a controllable
//! test clock. Available with the `test-helpers` feature or in test builds.

use crate::application::ports::Clock;
use chrono::{Local, NaiveDate};

/// System clock returning the host's current calendar day.
///
/// Uses local time so the recorded day matches the host's aggregation day.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
