//! Visit tracking integration.
//!
//! `VisitTracker` binds a `VisitFilter` to a persistence backend and table
//! name. It is the type hosts embed: one `track_visit` call per request.

use crate::application::filter::{FilterOutcome, VisitFilter};
use crate::application::metrics::Metrics;
use crate::application::ports::{
    Clock, InsertId, NoopHook, SkipTrackingHook, StoreError, VisitStore,
};
use crate::domain::blacklist::UserAgentBlacklist;
use crate::domain::record::VisitRecord;
use crate::domain::request::RequestContext;
use crate::domain::rules::ExclusionReason;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::store::MemoryVisitStore;
use std::sync::Arc;

/// Default table name for visit rows.
pub const DEFAULT_TABLE: &str = "visits";

/// Error returned when building a `VisitTracker` fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Table name must not be empty
    EmptyTableName,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::EmptyTableName => {
                write!(f, "table name must not be empty")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Outcome of a tracking attempt whose persistence (if any) succeeded.
///
/// Exclusion is not an error: it is reported here, while a rejected insert
/// surfaces as `Err(StoreError)` from [`VisitTracker::track_visit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// A rule or the override hook rejected the request; nothing was stored.
    Excluded(ExclusionReason),
    /// The visit was recorded and persisted under the given id.
    Tracked {
        /// Row id generated by the store
        id: InsertId,
        /// The persisted record
        record: VisitRecord,
    },
}

impl TrackOutcome {
    /// Check if a visit was persisted.
    pub fn is_tracked(&self) -> bool {
        matches!(self, TrackOutcome::Tracked { .. })
    }

    /// Check if the request was excluded.
    pub fn is_excluded(&self) -> bool {
        matches!(self, TrackOutcome::Excluded(_))
    }
}

/// Evaluates requests and persists tracked visits.
///
/// Cloning is cheap: clones share the store, the hook, and the metrics.
#[derive(Clone)]
pub struct VisitTracker {
    filter: VisitFilter,
    store: Arc<dyn VisitStore>,
    table: String,
}

impl VisitTracker {
    /// Create a tracker with defaults: empty blacklist, system clock,
    /// pass-through hook, in-memory store, table `visits`.
    pub fn new() -> Self {
        Self {
            filter: VisitFilter::new(
                UserAgentBlacklist::empty(),
                Arc::new(SystemClock::new()),
                Arc::new(NoopHook),
            ),
            store: Arc::new(MemoryVisitStore::new()),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Start building a customized tracker.
    pub fn builder() -> VisitTrackerBuilder {
        VisitTrackerBuilder::new()
    }

    /// Evaluate a request and persist the visit when tracking proceeds.
    ///
    /// The store is called at most once, and only for a tracked outcome.
    /// A rejected insert is returned as `Err` so callers can distinguish
    /// "correctly excluded" from "should have tracked but storage failed".
    pub fn track_visit(&self, context: &RequestContext) -> Result<TrackOutcome, StoreError> {
        match self.filter.check(context) {
            FilterOutcome::Excluded(reason) => Ok(TrackOutcome::Excluded(reason)),
            FilterOutcome::Track(record) => {
                match self.store.insert(&self.table, &record.fields()) {
                    Ok(id) => {
                        tracing::debug!(id, target = %record.target, "visit recorded");
                        Ok(TrackOutcome::Tracked { id, record })
                    }
                    Err(error) => {
                        self.filter.metrics().record_store_failure();
                        tracing::warn!(%error, target = %record.target, "visit insert failed");
                        Err(error)
                    }
                }
            }
        }
    }

    /// The underlying filter.
    pub fn filter(&self) -> &VisitFilter {
        &self.filter
    }

    /// The tracker's metrics.
    pub fn metrics(&self) -> &Metrics {
        self.filter.metrics()
    }

    /// The configured table name.
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl Default for VisitTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a `VisitTracker`.
pub struct VisitTrackerBuilder {
    blacklist: UserAgentBlacklist,
    clock: Option<Arc<dyn Clock>>,
    hook: Option<Arc<dyn SkipTrackingHook>>,
    store: Option<Arc<dyn VisitStore>>,
    table: String,
}

impl VisitTrackerBuilder {
    fn new() -> Self {
        Self {
            blacklist: UserAgentBlacklist::empty(),
            clock: None,
            hook: None,
            store: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Set the user-agent blacklist.
    pub fn with_blacklist(mut self, blacklist: UserAgentBlacklist) -> Self {
        self.blacklist = blacklist;
        self
    }

    /// Set the clock used to stamp records.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Register a skip-tracking hook.
    pub fn with_hook(mut self, hook: Arc<dyn SkipTrackingHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Set the persistence backend.
    pub fn with_store(mut self, store: Arc<dyn VisitStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the table name rows are inserted into.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Build the tracker.
    ///
    /// # Errors
    /// Returns `BuildError::EmptyTableName` if the table name is empty.
    pub fn build(self) -> Result<VisitTracker, BuildError> {
        if self.table.is_empty() {
            return Err(BuildError::EmptyTableName);
        }

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        let hook = self.hook.unwrap_or_else(|| Arc::new(NoopHook));
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryVisitStore::new()));

        Ok(VisitTracker {
            filter: VisitFilter::new(self.blacklist, clock, hook),
            store,
            table: self.table,
        })
    }
}

impl Default for VisitTrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mocks::{MockClock, MockStore};
    use chrono::NaiveDate;

    const UA_VALID: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
    }

    #[test]
    fn test_build_rejects_empty_table() {
        let result = VisitTracker::builder().with_table("").build();
        assert_eq!(result.err(), Some(BuildError::EmptyTableName));
    }

    #[test]
    fn test_defaults() {
        let tracker = VisitTracker::new();
        assert_eq!(tracker.table(), DEFAULT_TABLE);
        assert!(tracker.filter().blacklist().is_empty());
    }

    #[test]
    fn test_tracked_visit_is_persisted_once() {
        let store = Arc::new(MockStore::new());
        let tracker = VisitTracker::builder()
            .with_clock(Arc::new(MockClock::new(date())))
            .with_store(store.clone())
            .build()
            .unwrap();

        let ctx = RequestContext::new("/some/page/").with_user_agent(UA_VALID);
        let outcome = tracker.track_visit(&ctx).unwrap();

        assert!(outcome.is_tracked());
        assert_eq!(store.insert_count(), 1);
    }

    #[test]
    fn test_excluded_visit_never_touches_store() {
        let store = Arc::new(MockStore::new());
        let tracker = VisitTracker::builder()
            .with_store(store.clone())
            .build()
            .unwrap();

        let ctx = RequestContext::new("/some/page/");
        let outcome = tracker.track_visit(&ctx).unwrap();

        assert_eq!(
            outcome,
            TrackOutcome::Excluded(ExclusionReason::MissingUserAgent)
        );
        assert_eq!(store.attempts(), 0);
    }

    #[test]
    fn test_insert_uses_configured_table() {
        let store = Arc::new(MockStore::new());
        let tracker = VisitTracker::builder()
            .with_clock(Arc::new(MockClock::new(date())))
            .with_store(store.clone())
            .with_table("page_views")
            .build()
            .unwrap();

        let ctx = RequestContext::new("/some/page/").with_user_agent(UA_VALID);
        tracker.track_visit(&ctx).unwrap();

        let (table, _fields) = store.captured().pop().unwrap();
        assert_eq!(table, "page_views");
    }

    #[test]
    fn test_store_failure_surfaces_as_error() {
        let store = Arc::new(MockStore::new());
        store.fail_with("disk full");
        let tracker = VisitTracker::builder()
            .with_store(store.clone())
            .build()
            .unwrap();

        let ctx = RequestContext::new("/some/page/").with_user_agent(UA_VALID);
        let result = tracker.track_visit(&ctx);

        assert_eq!(result, Err(StoreError::Backend("disk full".to_string())));
        assert_eq!(tracker.metrics().store_failures(), 1);
    }
}
