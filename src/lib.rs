//! # visit-tracker
//!
//! Page-view tracking with referrer/user-agent filtering and pluggable
//! exclusion rules.
//!
//! This crate decides whether an incoming HTTP request should be recorded
//! as a page view. Each request is evaluated against an ordered chain of
//! exclusion rules (missing target, missing or blacklisted user agent,
//! host-environment flags such as feeds and error pages), then a
//! host-registered override hook gets the final word, and the surviving
//! requests are persisted as normalized `(created, target, referrer)`
//! records through a pluggable storage port.
//!
//! ## Quick Start
//!
//! ```
//! use visit_tracker::{RequestContext, UserAgentBlacklist, VisitTracker};
//!
//! let tracker = VisitTracker::builder()
//!     .with_blacklist(UserAgentBlacklist::default_bots())
//!     .build()
//!     .unwrap();
//!
//! let request = RequestContext::new("/some/page/")
//!     .with_user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36")
//!     .with_referrer("https://example.org");
//!
//! let outcome = tracker.track_visit(&request).unwrap();
//! assert!(outcome.is_tracked());
//! ```
//!
//! ## Exclusion Rules
//!
//! Rules run in a fixed order and the first exclusion wins:
//!
//! 1. Empty target path
//! 2. Missing or empty user agent
//! 3. User agent matching the configured blacklist (case-insensitive
//!    substring patterns, in list order)
//! 4. Any host-environment flag: feed, trackback, 404, robots, logged-in
//!    user, preview, search
//!
//! Absent header values degrade to exclusion; nothing about a request is
//! ever a fatal error. Exclusion is a successful outcome, reported as
//! [`TrackOutcome::Excluded`] with its [`ExclusionReason`].
//!
//! ## The Override Hook
//!
//! After the built-in rules, a [`SkipTrackingHook`] runs exactly once per
//! evaluation. It receives the tentative skip verdict and returns the
//! final one, so a registrant can suppress requests the rules allowed or
//! force tracking of requests the rules excluded. Closures work directly:
//!
//! ```
//! use std::sync::Arc;
//! use visit_tracker::{RequestContext, VisitTracker};
//!
//! // Suppress everything, e.g. while honoring a consent banner opt-out.
//! let tracker = VisitTracker::builder()
//!     .with_hook(Arc::new(|_tentative: bool| true))
//!     .build()
//!     .unwrap();
//!
//! let request = RequestContext::new("/some/page/").with_user_agent("Mozilla/5.0");
//! assert!(tracker.track_visit(&request).unwrap().is_excluded());
//! ```
//!
//! ## Persistence
//!
//! Tracked visits are handed to a [`VisitStore`] as a table name plus a
//! three-field row map (`created`, `target`, `referrer`). The store is
//! called at most once per evaluation. A rejected insert surfaces as
//! `Err(StoreError)` from [`VisitTracker::track_visit`], on a separate
//! channel from exclusion, so callers can tell "correctly excluded" from
//! "should have tracked but storage failed". The bundled
//! [`MemoryVisitStore`] is a concurrent in-memory backend; database-backed
//! hosts implement the port themselves.
//!
//! ## Observability
//!
//! The filter counts tracked and excluded evaluations and store failures:
//!
//! ```
//! # use visit_tracker::{RequestContext, VisitTracker};
//! # let tracker = VisitTracker::new();
//! # let request = RequestContext::new("/some/page/").with_user_agent("Mozilla/5.0");
//! # tracker.track_visit(&request).unwrap();
//! let snapshot = tracker.metrics().snapshot();
//! println!("tracked: {}", snapshot.visits_tracked);
//! println!("excluded: {}", snapshot.visits_excluded);
//! println!("exclusion rate: {:.2}%", snapshot.exclusion_rate() * 100.0);
//! ```
//!
//! Decision points also emit `tracing` events (`trace` for exclusions,
//! `debug` for recorded visits, `warn` for store failures); no subscriber
//! is installed by the library.
//!
//! ## Testing
//!
//! Deterministic test doubles (`MockClock`, `MockStore`, `MockHook`) live
//! in `infrastructure::mocks`, available with the `test-helpers` feature:
//!
//! ```toml
//! [dev-dependencies]
//! visit-tracker = { version = "*", features = ["test-helpers"] }
//! ```

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    blacklist::UserAgentBlacklist,
    record::VisitRecord,
    request::{RequestContext, RequestFlags},
    rules::{ExclusionReason, TrackingDecision},
};

pub use application::{
    filter::{FilterOutcome, VisitFilter},
    metrics::{Metrics, MetricsSnapshot},
    ports::{Clock, InsertId, NoopHook, SkipTrackingHook, StoreError, VisitStore},
};

pub use infrastructure::{
    clock::SystemClock,
    store::MemoryVisitStore,
    tracker::{BuildError, TrackOutcome, VisitTracker, VisitTrackerBuilder, DEFAULT_TABLE},
};
