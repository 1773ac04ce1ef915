//! Basic example demonstrating visit tracking with exclusion rules.
//!
//! This example sets up a tracker with a user-agent blacklist and an
//! override hook, then runs a few requests through it and prints the
//! outcome of each.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use visit_tracker::{RequestContext, RequestFlags, TrackOutcome, UserAgentBlacklist, VisitTracker};

fn main() {
    // Build a tracker with the stock bot blacklist and a hook that can
    // pause tracking globally, for example during maintenance windows.
    let paused = Arc::new(AtomicBool::new(false));
    let paused_for_hook = Arc::clone(&paused);
    let tracker = VisitTracker::builder()
        .with_blacklist(UserAgentBlacklist::default_bots())
        .with_hook(Arc::new(move |tentative_skip: bool| {
            tentative_skip || paused_for_hook.load(Ordering::Relaxed)
        }))
        .build()
        .expect("default table name is valid");

    println!("=== Basic Visit Tracking Example ===\n");

    let requests = [
        ("browser page view", RequestContext::new("/blog/hello-world/")
            .with_user_agent("Mozilla/5.0 (X11; Linux x86_64)")
            .with_referrer("https://example.com/")),
        ("crawler hit", RequestContext::new("/blog/hello-world/")
            .with_user_agent("Googlebot/2.1 (+http://www.google.com/bot.html)")),
        ("feed fetch", RequestContext::new("/feed/")
            .with_user_agent("Mozilla/5.0 (X11; Linux x86_64)")
            .with_flags(RequestFlags {
                is_feed: true,
                ..RequestFlags::default()
            })),
        ("missing user agent", RequestContext::new("/blog/hello-world/")),
    ];

    for (label, request) in requests {
        match tracker.track_visit(&request) {
            Ok(TrackOutcome::Tracked { id, record }) => {
                println!("{label}: tracked as row {id} ({} -> {})", record.created, record.target);
            }
            Ok(TrackOutcome::Excluded(reason)) => {
                println!("{label}: excluded ({reason})");
            }
            Err(error) => {
                println!("{label}: storage failed ({error})");
            }
        }
    }

    // Pause tracking: the hook now suppresses even valid requests.
    paused.store(true, Ordering::Relaxed);
    let request = RequestContext::new("/blog/hello-world/")
        .with_user_agent("Mozilla/5.0 (X11; Linux x86_64)");
    match tracker.track_visit(&request) {
        Ok(TrackOutcome::Excluded(reason)) => {
            println!("paused page view: excluded ({reason})");
        }
        other => println!("paused page view: unexpected outcome {other:?}"),
    }

    let snapshot = tracker.metrics().snapshot();
    println!("\n=== Example Complete ===");
    println!(
        "Evaluations: {} tracked, {} excluded ({:.0}% exclusion rate)",
        snapshot.visits_tracked,
        snapshot.visits_excluded,
        snapshot.exclusion_rate() * 100.0
    );
}
