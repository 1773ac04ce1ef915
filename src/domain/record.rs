//! The normalized visit record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A page view ready for persistence.
///
/// `created` carries calendar-day granularity only, so downstream
/// aggregation can group by day without normalizing timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Calendar day of the visit.
    pub created: NaiveDate,
    /// Request path that was viewed.
    pub target: String,
    /// Referrer header value, empty when none was sent.
    pub referrer: String,
}

impl VisitRecord {
    /// Build a record from evaluation inputs.
    ///
    /// An absent referrer becomes the empty string; a present one is copied
    /// verbatim.
    pub fn new(created: NaiveDate, target: impl Into<String>, referrer: Option<String>) -> Self {
        Self {
            created,
            target: target.into(),
            referrer: referrer.unwrap_or_default(),
        }
    }

    /// Row form for the insert contract: exactly the three fields
    /// `created` (formatted `YYYY-MM-DD`), `target`, and `referrer`.
    pub fn fields(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                "created".to_string(),
                self.created.format("%Y-%m-%d").to_string(),
            ),
            ("target".to_string(), self.target.clone()),
            ("referrer".to_string(), self.referrer.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
    }

    #[test]
    fn test_absent_referrer_becomes_empty_string() {
        let record = VisitRecord::new(date(), "/some/page/", None);
        assert_eq!(record.referrer, "");
    }

    #[test]
    fn test_referrer_copied_verbatim() {
        let record = VisitRecord::new(date(), "/a/", Some("https://example.org".to_string()));
        assert_eq!(record.referrer, "https://example.org");
    }

    #[test]
    fn test_fields_shape() {
        let record = VisitRecord::new(date(), "/some/page/", None);
        let fields = record.fields();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("created").map(String::as_str), Some("2023-04-01"));
        assert_eq!(fields.get("target").map(String::as_str), Some("/some/page/"));
        assert_eq!(fields.get("referrer").map(String::as_str), Some(""));
    }
}
