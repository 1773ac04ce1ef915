//! Store implementations for visit rows.
//!
//! Provides a concurrent in-memory store. Database-backed hosts implement
//! the `VisitStore` port against their own connection handling instead.

use crate::application::ports::{InsertId, StoreError, VisitStore};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe in-memory visit store backed by DashMap.
///
/// Rows are keyed by their generated id, which starts at 1 and increases
/// strictly. The store holds a single logical table; the table name passed
/// to `insert` is not interpreted. Useful as a default backend and for
/// hosts that flush visits elsewhere in batches.
#[derive(Debug, Default)]
pub struct MemoryVisitStore {
    rows: DashMap<InsertId, BTreeMap<String, String>>,
    next_id: AtomicU64,
}

impl MemoryVisitStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a copy of the row with the given id.
    pub fn get(&self, id: InsertId) -> Option<BTreeMap<String, String>> {
        self.rows.get(&id).map(|row| row.clone())
    }

    /// Remove all rows. Ids are not reused.
    pub fn clear(&self) {
        self.rows.clear();
    }

    /// Iterate over all rows with a callback.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(InsertId, &BTreeMap<String, String>),
    {
        for entry in self.rows.iter() {
            f(*entry.key(), entry.value());
        }
    }
}

impl VisitStore for MemoryVisitStore {
    fn insert(
        &self,
        _table: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<InsertId, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.rows.insert(id, fields.clone());
        Ok(id)
    }
}
