//! Built-in exclusion rules.
//!
//! The rule chain is an ordered short-circuit evaluation: the first rule
//! that fires decides the exclusion reason and no further rules run.

use crate::domain::blacklist::UserAgentBlacklist;
use crate::domain::request::RequestContext;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a request was not recorded as a page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionReason {
    /// No usable target path.
    EmptyTarget,
    /// No user-agent header, or an empty one.
    MissingUserAgent,
    /// The user agent matched a blacklist pattern.
    BlacklistedUserAgent,
    /// Feed request.
    Feed,
    /// Trackback/pingback request.
    Trackback,
    /// "Not found" page.
    NotFound,
    /// Robots exclusion file.
    Robots,
    /// Authenticated user session.
    LoggedIn,
    /// Content preview.
    Preview,
    /// Search result page.
    Search,
    /// The skip-tracking hook suppressed a request the built-in rules allowed.
    Overridden,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExclusionReason::EmptyTarget => "empty_target",
            ExclusionReason::MissingUserAgent => "missing_user_agent",
            ExclusionReason::BlacklistedUserAgent => "blacklisted_user_agent",
            ExclusionReason::Feed => "feed",
            ExclusionReason::Trackback => "trackback",
            ExclusionReason::NotFound => "not_found",
            ExclusionReason::Robots => "robots",
            ExclusionReason::LoggedIn => "logged_in",
            ExclusionReason::Preview => "preview",
            ExclusionReason::Search => "search",
            ExclusionReason::Overridden => "overridden",
        };
        f.write_str(name)
    }
}

/// Outcome of rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingDecision {
    /// Record the visit.
    Track,
    /// Do not record the visit.
    Exclude(ExclusionReason),
}

impl TrackingDecision {
    /// Check if this decision is Track.
    pub fn is_track(&self) -> bool {
        matches!(self, TrackingDecision::Track)
    }

    /// Check if this decision is Exclude.
    pub fn is_exclude(&self) -> bool {
        matches!(self, TrackingDecision::Exclude(_))
    }

    /// The exclusion reason, if excluded.
    pub fn reason(&self) -> Option<ExclusionReason> {
        match self {
            TrackingDecision::Track => None,
            TrackingDecision::Exclude(reason) => Some(*reason),
        }
    }
}

/// Apply the built-in rule chain to a request.
///
/// Order matters: target, then user agent presence, then the blacklist,
/// then the host-environment flags. The first exclusion wins. Absent or
/// empty header values degrade to exclusion, never to an error.
pub fn built_in_decision(
    context: &RequestContext,
    blacklist: &UserAgentBlacklist,
) -> TrackingDecision {
    use TrackingDecision::Exclude;

    if context.target_path.is_empty() {
        return Exclude(ExclusionReason::EmptyTarget);
    }

    let user_agent = match context.user_agent.as_deref() {
        Some(ua) if !ua.is_empty() => ua,
        _ => return Exclude(ExclusionReason::MissingUserAgent),
    };

    if blacklist.matches(user_agent) {
        return Exclude(ExclusionReason::BlacklistedUserAgent);
    }

    let flags = &context.flags;
    if flags.is_feed {
        return Exclude(ExclusionReason::Feed);
    }
    if flags.is_trackback {
        return Exclude(ExclusionReason::Trackback);
    }
    if flags.is_404 {
        return Exclude(ExclusionReason::NotFound);
    }
    if flags.is_robots {
        return Exclude(ExclusionReason::Robots);
    }
    if flags.is_user_logged_in {
        return Exclude(ExclusionReason::LoggedIn);
    }
    if flags.is_preview {
        return Exclude(ExclusionReason::Preview);
    }
    if flags.is_search {
        return Exclude(ExclusionReason::Search);
    }

    TrackingDecision::Track
}
