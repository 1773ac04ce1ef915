//! Visit filter evaluation logic.
//!
//! The filter decides whether a request becomes a page view: the built-in
//! exclusion rules run first, then the host override hook, then the record
//! is constructed. Evaluation is stateless apart from the injected clock
//! and hook, so concurrent evaluations need no coordination.

use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, SkipTrackingHook};
use crate::domain::blacklist::UserAgentBlacklist;
use crate::domain::record::VisitRecord;
use crate::domain::request::RequestContext;
use crate::domain::rules::{built_in_decision, ExclusionReason, TrackingDecision};
use std::sync::Arc;

/// Result of a full evaluation, including the constructed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// A rule or the override hook rejected the request.
    Excluded(ExclusionReason),
    /// The request should be recorded as this visit.
    Track(VisitRecord),
}

impl FilterOutcome {
    /// Check if this outcome carries a record.
    pub fn is_track(&self) -> bool {
        matches!(self, FilterOutcome::Track(_))
    }

    /// The record, if tracking proceeds.
    pub fn into_record(self) -> Option<VisitRecord> {
        match self {
            FilterOutcome::Track(record) => Some(record),
            FilterOutcome::Excluded(_) => None,
        }
    }
}

/// Evaluates requests against the exclusion rules and the override hook.
///
/// Cloning is cheap and shares the metrics counters.
#[derive(Clone)]
pub struct VisitFilter {
    blacklist: UserAgentBlacklist,
    clock: Arc<dyn Clock>,
    hook: Arc<dyn SkipTrackingHook>,
    metrics: Metrics,
}

impl VisitFilter {
    /// Create a filter with the given blacklist, clock, and hook.
    pub fn new(
        blacklist: UserAgentBlacklist,
        clock: Arc<dyn Clock>,
        hook: Arc<dyn SkipTrackingHook>,
    ) -> Self {
        Self {
            blacklist,
            clock,
            hook,
            metrics: Metrics::new(),
        }
    }

    /// Decide whether a request should be tracked, without building a record.
    ///
    /// The built-in rules run first (ordered, first exclusion wins). The
    /// override hook then runs exactly once, receiving the tentative skip
    /// verdict; its return value is final and can force both directions.
    /// When the hook suppresses a request the rules allowed, the reason is
    /// [`ExclusionReason::Overridden`]; when the rules already excluded it,
    /// the original reason is kept.
    pub fn decision(&self, context: &RequestContext) -> TrackingDecision {
        let tentative = built_in_decision(context, &self.blacklist);
        let final_skip = self.hook.filter(tentative.is_exclude());

        match (final_skip, tentative) {
            (false, _) => TrackingDecision::Track,
            (true, TrackingDecision::Exclude(reason)) => TrackingDecision::Exclude(reason),
            (true, TrackingDecision::Track) => {
                TrackingDecision::Exclude(ExclusionReason::Overridden)
            }
        }
    }

    /// Evaluate a request fully, building the record when tracking proceeds.
    ///
    /// Records metrics for the outcome. Never performs persistence.
    pub fn check(&self, context: &RequestContext) -> FilterOutcome {
        match self.decision(context) {
            TrackingDecision::Track => {
                self.metrics.record_tracked();
                FilterOutcome::Track(VisitRecord::new(
                    self.clock.today(),
                    context.target_path.clone(),
                    context.referrer.clone(),
                ))
            }
            TrackingDecision::Exclude(reason) => {
                self.metrics.record_excluded();
                tracing::trace!(%reason, target = %context.target_path, "visit excluded");
                FilterOutcome::Excluded(reason)
            }
        }
    }

    /// Evaluate a request and return the record when tracking proceeds.
    pub fn evaluate(&self, context: &RequestContext) -> Option<VisitRecord> {
        self.check(context).into_record()
    }

    /// The configured blacklist.
    pub fn blacklist(&self) -> &UserAgentBlacklist {
        &self.blacklist
    }

    /// The filter's metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
