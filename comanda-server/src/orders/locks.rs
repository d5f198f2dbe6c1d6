//! Per-table lock registry
//!
//! Each mutating order operation runs inside the lock(s) of the
//! resources it touches, so two staff members opening the same table
//! at once serialize instead of both succeeding. Keys are record-id
//! strings; takeaway orders (no table) lock on their own order id.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct TableLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl TableLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    fn entry(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Acquire the locks for a set of keys.
    ///
    /// Keys are sorted and deduplicated first so concurrent callers
    /// always lock in the same order.
    pub async fn acquire_keys(&self, mut keys: Vec<String>) -> Vec<OwnedMutexGuard<()>> {
        keys.sort();
        keys.dedup();
        let mut guards = Vec::with_capacity(keys.len());
        for key in &keys {
            guards.push(self.entry(key).lock_owned().await);
        }
        guards
    }
}
