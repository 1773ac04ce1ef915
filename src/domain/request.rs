//! Request context for visit evaluation.
//!
//! The host environment builds one `RequestContext` per incoming request and
//! hands it to the filter. All ambient state (routing predicates, headers)
//! is captured here explicitly, which keeps evaluation pure.

use serde::{Deserialize, Serialize};

/// Host-environment predicates describing the current request.
///
/// Each flag marks a request class that is never counted as a page view
/// (feeds, trackbacks, error pages, ...). The host populates these from its
/// own routing state; the filter treats them as opaque booleans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFlags {
    /// The request serves a syndication feed.
    pub is_feed: bool,
    /// The request is a trackback/pingback.
    pub is_trackback: bool,
    /// The request resolved to a "not found" page.
    pub is_404: bool,
    /// The request serves the robots exclusion file.
    pub is_robots: bool,
    /// A user session is authenticated for this request.
    pub is_user_logged_in: bool,
    /// The request renders an unpublished content preview.
    pub is_preview: bool,
    /// The request serves a search result page.
    pub is_search: bool,
}

impl RequestFlags {
    /// True if any flag is set.
    pub fn any(&self) -> bool {
        self.is_feed
            || self.is_trackback
            || self.is_404
            || self.is_robots
            || self.is_user_logged_in
            || self.is_preview
            || self.is_search
    }
}

/// Immutable snapshot of an incoming request, one per evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Normalized request path. Empty means "no target".
    pub target_path: String,
    /// Raw referrer header value, if one was sent.
    pub referrer: Option<String>,
    /// Raw user-agent header value, if one was sent.
    pub user_agent: Option<String>,
    /// Host-environment predicates for this request.
    pub flags: RequestFlags,
}

impl RequestContext {
    /// Create a context for the given target path.
    pub fn new(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            ..Self::default()
        }
    }

    /// Set the referrer header value.
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    /// Set the user-agent header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the host-environment flags.
    pub fn with_flags(mut self, flags: RequestFlags) -> Self {
        self.flags = flags;
        self
    }
}
