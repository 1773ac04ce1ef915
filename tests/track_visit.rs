//! End-to-end tracking scenarios against a mock clock and store.

use chrono::NaiveDate;
use std::sync::Arc;
use visit_tracker::infrastructure::mocks::{MockClock, MockStore};
use visit_tracker::{
    ExclusionReason, RequestContext, RequestFlags, TrackOutcome, UserAgentBlacklist, VisitTracker,
};

const TARGET_1: &str = "/some/page/";
const TARGET_2: &str = "/another/page/";
const REFERRER: &str = "https://pluginkollektiv.org";
const UA_BLOCKED: &str = "curl/7.58.0";
const UA_VALID: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                        Chrome/66.0.3359.170 Safari/537.36 OPR/53.0.2907.68";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
}

fn tracker(store: Arc<MockStore>) -> VisitTracker {
    VisitTracker::builder()
        .with_blacklist(UserAgentBlacklist::new(["curl", "wget", "bot"]))
        .with_clock(Arc::new(MockClock::new(today())))
        .with_store(store)
        .build()
        .unwrap()
}

#[test]
fn missing_target_and_user_agent_is_not_tracked() {
    let store = Arc::new(MockStore::new());
    let tracker = tracker(store.clone());

    // Without valid target and user agent nothing should happen.
    let outcome = tracker.track_visit(&RequestContext::default()).unwrap();
    assert_eq!(outcome, TrackOutcome::Excluded(ExclusionReason::EmptyTarget));
    assert_eq!(store.attempts(), 0);

    // Set target, still nothing expected.
    let outcome = tracker.track_visit(&RequestContext::new(TARGET_1)).unwrap();
    assert_eq!(
        outcome,
        TrackOutcome::Excluded(ExclusionReason::MissingUserAgent)
    );
    assert_eq!(store.attempts(), 0);
}

#[test]
fn blacklisted_user_agent_is_not_tracked() {
    let store = Arc::new(MockStore::new());
    let tracker = tracker(store.clone());

    let request = RequestContext::new(TARGET_1).with_user_agent(UA_BLOCKED);
    let outcome = tracker.track_visit(&request).unwrap();

    assert_eq!(
        outcome,
        TrackOutcome::Excluded(ExclusionReason::BlacklistedUserAgent)
    );
    assert_eq!(store.attempts(), 0);
}

#[test]
fn valid_request_without_referrer_is_tracked() {
    let store = Arc::new(MockStore::new());
    let tracker = tracker(store.clone());

    let request = RequestContext::new(TARGET_1).with_user_agent(UA_VALID);
    let outcome = tracker.track_visit(&request).unwrap();

    match outcome {
        TrackOutcome::Tracked { id, record } => {
            assert_eq!(id, 1);
            assert_eq!(record.created, today());
            assert_eq!(record.target, TARGET_1);
            assert_eq!(record.referrer, "");
        }
        other => panic!("expected tracked outcome, got {:?}", other),
    }

    // Validate the captured insert: exactly three fields.
    let fields = store.last_insert().expect("insert should be captured");
    assert_eq!(fields.len(), 3);
    assert_eq!(fields.get("created").map(String::as_str), Some("2023-04-01"));
    assert_eq!(fields.get("target").map(String::as_str), Some(TARGET_1));
    assert_eq!(fields.get("referrer").map(String::as_str), Some(""));
}

#[test]
fn referrer_is_copied_verbatim() {
    let store = Arc::new(MockStore::new());
    let tracker = tracker(store.clone());

    let request = RequestContext::new(TARGET_2)
        .with_user_agent(UA_VALID)
        .with_referrer(REFERRER);
    let outcome = tracker.track_visit(&request).unwrap();

    assert!(outcome.is_tracked());
    let fields = store.last_insert().unwrap();
    assert_eq!(fields.get("referrer").map(String::as_str), Some(REFERRER));
    assert_eq!(fields.get("target").map(String::as_str), Some(TARGET_2));
}

#[test]
fn each_flag_excludes_the_request() {
    let store = Arc::new(MockStore::new());
    let tracker = tracker(store.clone());

    let cases = [
        (
            RequestFlags {
                is_feed: true,
                ..RequestFlags::default()
            },
            ExclusionReason::Feed,
        ),
        (
            RequestFlags {
                is_trackback: true,
                ..RequestFlags::default()
            },
            ExclusionReason::Trackback,
        ),
        (
            RequestFlags {
                is_404: true,
                ..RequestFlags::default()
            },
            ExclusionReason::NotFound,
        ),
        (
            RequestFlags {
                is_robots: true,
                ..RequestFlags::default()
            },
            ExclusionReason::Robots,
        ),
        (
            RequestFlags {
                is_user_logged_in: true,
                ..RequestFlags::default()
            },
            ExclusionReason::LoggedIn,
        ),
        (
            RequestFlags {
                is_preview: true,
                ..RequestFlags::default()
            },
            ExclusionReason::Preview,
        ),
        (
            RequestFlags {
                is_search: true,
                ..RequestFlags::default()
            },
            ExclusionReason::Search,
        ),
    ];

    for (flags, expected) in cases {
        let request = RequestContext::new(TARGET_1)
            .with_user_agent(UA_VALID)
            .with_flags(flags);
        let outcome = tracker.track_visit(&request).unwrap();
        assert_eq!(outcome, TrackOutcome::Excluded(expected));
    }

    // None of the excluded requests reached the store.
    assert_eq!(store.attempts(), 0);
}

#[test]
fn created_follows_the_injected_clock() {
    let store = Arc::new(MockStore::new());
    let clock = Arc::new(MockClock::new(today()));
    let tracker = VisitTracker::builder()
        .with_clock(clock.clone())
        .with_store(store.clone())
        .build()
        .unwrap();

    let request = RequestContext::new(TARGET_1).with_user_agent(UA_VALID);

    tracker.track_visit(&request).unwrap();
    clock.advance_days(1);
    tracker.track_visit(&request).unwrap();

    let captured = store.captured();
    assert_eq!(
        captured[0].1.get("created").map(String::as_str),
        Some("2023-04-01")
    );
    assert_eq!(
        captured[1].1.get("created").map(String::as_str),
        Some("2023-04-02")
    );
}

#[test]
fn metrics_reflect_tracking_activity() {
    let store = Arc::new(MockStore::new());
    let tracker = tracker(store);

    let tracked = RequestContext::new(TARGET_1).with_user_agent(UA_VALID);
    let excluded = RequestContext::new(TARGET_1).with_user_agent(UA_BLOCKED);

    tracker.track_visit(&tracked).unwrap();
    tracker.track_visit(&excluded).unwrap();
    tracker.track_visit(&excluded).unwrap();

    let snapshot = tracker.metrics().snapshot();
    assert_eq!(snapshot.visits_tracked, 1);
    assert_eq!(snapshot.visits_excluded, 2);
    assert_eq!(snapshot.store_failures, 0);
    assert_eq!(snapshot.total_evaluations(), 3);
}
