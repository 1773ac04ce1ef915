//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the
//! application layer needs. Infrastructure adapters implement these ports:
//! the system clock, the persistence backend, and the host-registered
//! skip-tracking hook.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Debug;

/// Identifier generated by a store for an inserted row.
pub type InsertId = u64;

/// Error returned by a [`VisitStore`] when an insert fails.
///
/// Persistence failure is a distinct channel from exclusion: an excluded
/// request is a successful evaluation, a store error is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The storage backend rejected or could not complete the insert.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(message) => {
                write!(f, "storage backend error: {}", message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Port for obtaining the current calendar date.
///
/// This abstraction allows the application layer to stamp visit records
/// without depending on the system clock. Infrastructure provides concrete
/// implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current date, at calendar-day granularity.
    fn today(&self) -> NaiveDate;
}

/// Port for persisting visit rows.
///
/// Implementations receive a table name and a field map and return the
/// generated row id. The filter calls this at most once per evaluation,
/// and only for a tracked outcome. Retry and consistency semantics belong
/// to the implementation, not to the filter.
pub trait VisitStore: Send + Sync + Debug {
    /// Insert one row into `table` and return its generated id.
    fn insert(
        &self,
        table: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<InsertId, StoreError>;
}

/// Port for the host-registered tracking override.
///
/// The hook is invoked exactly once per evaluation with the tentative skip
/// verdict produced by the built-in rules; its return value is the final
/// verdict. This lets a registrant force both directions: suppress a
/// request the rules allowed, or track a request the rules excluded.
///
/// Closures implement this port directly:
///
/// ```
/// use visit_tracker::SkipTrackingHook;
///
/// // Never track, no matter what the rules said.
/// let hook = |_tentative_skip: bool| true;
/// assert!(hook.filter(false));
/// ```
pub trait SkipTrackingHook: Send + Sync {
    /// Return the final skip verdict given the tentative one.
    fn filter(&self, tentative_skip: bool) -> bool;
}

impl<F> SkipTrackingHook for F
where
    F: Fn(bool) -> bool + Send + Sync,
{
    fn filter(&self, tentative_skip: bool) -> bool {
        self(tentative_skip)
    }
}

/// Default hook registrant: keeps the built-in verdict unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl SkipTrackingHook for NoopHook {
    fn filter(&self, tentative_skip: bool) -> bool {
        tentative_skip
    }
}
