use crate::Row;

use sqltable_core::Value;

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Identity map from primary key to row object, owned by one table.
///
/// The cache is never shared between tables, even tables over the same SQL
/// table. Entries leave it only through [`RowCache::evict`], which the table
/// calls when a key is deleted or renamed.
///
/// A disabled cache remembers nothing: every lookup misses.
#[derive(Debug)]
pub(crate) struct RowCache {
    enabled: bool,
    rows: Mutex<HashMap<Value, Row>>,
}

impl RowCache {
    pub(crate) fn new(enabled: bool) -> RowCache {
        RowCache {
            enabled,
            rows: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached row for `key`, or `None` on a miss.
    pub(crate) fn get(&self, key: &Value) -> Option<Row> {
        let row = self.rows().get(key).cloned();
        tracing::trace!(%key, hit = row.is_some(), "row cache lookup");
        row
    }

    /// Installs `row` under `key`, replacing any previous entry.
    pub(crate) fn put(&self, key: Value, row: Row) {
        if !self.enabled {
            return;
        }

        self.rows().insert(key, row);
    }

    /// Removes the entry for `key`.
    pub(crate) fn evict(&self, key: &Value) -> Option<Row> {
        let row = self.rows().remove(key);
        if row.is_some() {
            tracing::trace!(%key, "row cache evict");
        }
        row
    }

    pub(crate) fn len(&self) -> usize {
        self.rows().len()
    }

    fn rows(&self) -> MutexGuard<'_, HashMap<Value, Row>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
