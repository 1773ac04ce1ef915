//! User-agent blacklist matching.

use serde::{Deserialize, Serialize};

/// Ordered list of user-agent patterns that exclude a request.
///
/// Matching is a case-insensitive substring test, evaluated in list order.
/// Patterns are lowercased once at construction so the per-request cost is
/// a single lowercase of the user-agent string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentBlacklist {
    patterns: Vec<String>,
}

impl UserAgentBlacklist {
    /// Create a blacklist from an ordered set of patterns.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.into().to_lowercase())
                .collect(),
        }
    }

    /// A blacklist that matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Common non-browser clients worth excluding from page-view counts.
    pub fn default_bots() -> Self {
        Self::new(["bot", "crawler", "spider", "curl", "wget", "python-requests"])
    }

    /// Append a pattern at the end of the list.
    pub fn push(&mut self, pattern: impl Into<String>) {
        self.patterns.push(pattern.into().to_lowercase());
    }

    /// Check whether the user agent matches any pattern.
    pub fn matches(&self, user_agent: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let ua = user_agent.to_lowercase();
        self.patterns.iter().any(|p| ua.contains(p.as_str()))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no pattern is configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_blacklist_matches_nothing() {
        let blacklist = UserAgentBlacklist::empty();
        assert!(!blacklist.matches("curl/7.58.0"));
        assert!(!blacklist.matches(""));
    }

    #[test]
    fn test_substring_match() {
        let blacklist = UserAgentBlacklist::new(["curl", "wget"]);
        assert!(blacklist.matches("curl/7.58.0"));
        assert!(blacklist.matches("Wget/1.20"));
        assert!(!blacklist.matches("Mozilla/5.0 (X11; Linux x86_64)"));
    }

    #[test]
    fn test_case_insensitive_both_sides() {
        let blacklist = UserAgentBlacklist::new(["GoogleBot"]);
        assert!(blacklist.matches("Mozilla/5.0 (compatible; googlebot/2.1)"));
        assert!(blacklist.matches("GOOGLEBOT"));
    }

    #[test]
    fn test_push_appends() {
        let mut blacklist = UserAgentBlacklist::empty();
        assert!(!blacklist.matches("curl/7.58.0"));

        blacklist.push("Curl");
        assert_eq!(blacklist.len(), 1);
        assert!(blacklist.matches("curl/7.58.0"));
    }

    #[test]
    fn test_default_bots_cover_common_clients() {
        let blacklist = UserAgentBlacklist::default_bots();
        assert!(blacklist.matches("curl/7.58.0"));
        assert!(blacklist.matches("Mozilla/5.0 (compatible; bingbot/2.0)"));
        assert!(!blacklist.matches(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/66.0"
        ));
    }
}
