//! Mock skip-tracking hook for testing.

use crate::application::ports::SkipTrackingHook;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HookMode {
    Passthrough,
    ForceSkip,
    ForceTrack,
}

/// Mock hook with a programmable verdict and an invocation counter.
///
/// Starts in pass-through mode (the default registrant behavior). Clones
/// share state, so a test can hold one clone and hand another to the
/// filter.
#[derive(Debug, Clone)]
pub struct MockHook {
    mode: Arc<Mutex<HookMode>>,
    invocations: Arc<AtomicU64>,
    last_tentative: Arc<Mutex<Option<bool>>>,
}

impl MockHook {
    /// Create a pass-through hook.
    pub fn new() -> Self {
        Self {
            mode: Arc::new(Mutex::new(HookMode::Passthrough)),
            invocations: Arc::new(AtomicU64::new(0)),
            last_tentative: Arc::new(Mutex::new(None)),
        }
    }

    /// Keep the built-in verdict (default).
    pub fn set_passthrough(&self) {
        *self.mode.lock().expect("MockHook mutex poisoned") = HookMode::Passthrough;
    }

    /// Always skip, even when the built-in rules allowed tracking.
    pub fn set_force_skip(&self) {
        *self.mode.lock().expect("MockHook mutex poisoned") = HookMode::ForceSkip;
    }

    /// Always track, even when the built-in rules excluded the request.
    pub fn set_force_track(&self) {
        *self.mode.lock().expect("MockHook mutex poisoned") = HookMode::ForceTrack;
    }

    /// Number of times the hook has been invoked.
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    /// The tentative verdict passed to the most recent invocation.
    pub fn last_tentative(&self) -> Option<bool> {
        *self.last_tentative.lock().expect("MockHook mutex poisoned")
    }
}

impl Default for MockHook {
    fn default() -> Self {
        Self::new()
    }
}

impl SkipTrackingHook for MockHook {
    fn filter(&self, tentative_skip: bool) -> bool {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        *self.last_tentative.lock().expect("MockHook mutex poisoned") = Some(tentative_skip);

        match *self.mode.lock().expect("MockHook mutex poisoned") {
            HookMode::Passthrough => tentative_skip,
            HookMode::ForceSkip => true,
            HookMode::ForceTrack => false,
        }
    }
}
