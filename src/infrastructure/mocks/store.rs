//! Mock store for testing.

use crate::application::ports::{InsertId, StoreError, VisitStore};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Mock store that captures inserts and can be switched into failure mode.
///
/// Clones share state: captured inserts, the attempt counter, and the
/// failure mode are visible across all clones.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    inserts: Arc<Mutex<Vec<(String, BTreeMap<String, String>)>>>,
    attempts: Arc<AtomicU64>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockStore {
    /// Create a mock store that accepts all inserts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent inserts fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().expect("MockStore mutex poisoned") = Some(message.into());
    }

    /// Return to accepting inserts.
    pub fn succeed(&self) {
        *self.failure.lock().expect("MockStore mutex poisoned") = None;
    }

    /// Number of insert calls, failed ones included.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Number of successfully captured inserts.
    pub fn insert_count(&self) -> usize {
        self.inserts.lock().expect("MockStore mutex poisoned").len()
    }

    /// Copy of all captured inserts as `(table, fields)` pairs, in order.
    pub fn captured(&self) -> Vec<(String, BTreeMap<String, String>)> {
        self.inserts
            .lock()
            .expect("MockStore mutex poisoned")
            .clone()
    }

    /// Fields of the most recent successful insert, if any.
    pub fn last_insert(&self) -> Option<BTreeMap<String, String>> {
        self.inserts
            .lock()
            .expect("MockStore mutex poisoned")
            .last()
            .map(|(_, fields)| fields.clone())
    }
}

impl VisitStore for MockStore {
    fn insert(
        &self,
        table: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<InsertId, StoreError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);

        if let Some(message) = self
            .failure
            .lock()
            .expect("MockStore mutex poisoned")
            .clone()
        {
            return Err(StoreError::Backend(message));
        }

        let mut inserts = self.inserts.lock().expect("MockStore mutex poisoned");
        inserts.push((table.to_string(), fields.clone()));
        Ok(inserts.len() as InsertId)
    }
}
