use crate::transaction::{RequestId, Transaction};
use dashmap::DashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

/// Concurrent map of in-flight transactions keyed by request id.
///
/// Per-id operations share the outer lock and contend only on the map shard
/// holding their key. `clear` takes the outer lock exclusively, so no caller
/// can observe a partially cleared store.
#[derive(Debug, Default)]
pub struct TransactionStore {
    slots: RwLock<DashMap<RequestId, Transaction>>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `transaction` under its id, returning any entry it replaced.
    pub fn put(&self, transaction: Transaction) -> Option<Transaction> {
        let id = transaction.id().clone();
        self.shared().insert(id, transaction)
    }

    pub fn get(&self, id: &RequestId) -> Option<Transaction> {
        self.shared().get(id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: &RequestId) -> bool {
        self.shared().contains_key(id)
    }

    /// Removes and returns the transaction stored under `id`.
    pub fn remove(&self, id: &RequestId) -> Option<Transaction> {
        self.shared().remove(id).map(|(_, transaction)| transaction)
    }

    /// Drops every transaction, returning how many were discarded.
    pub fn clear(&self) -> usize {
        let slots = self.exclusive();
        let discarded = slots.len();
        slots.clear();
        discarded
    }

    /// Drops transactions created more than `max_age` ago, returning how many
    /// were removed.
    pub fn sweep(&self, max_age: Duration) -> usize {
        self.sweep_at(Instant::now(), max_age)
    }

    pub(crate) fn sweep_at(&self, now: Instant, max_age: Duration) -> usize {
        let mut removed = 0;
        self.shared().retain(|_, transaction| {
            let keep = now.saturating_duration_since(transaction.created_at()) <= max_age;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.shared().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared().is_empty()
    }

    fn shared(&self) -> RwLockReadGuard<'_, DashMap<RequestId, Transaction>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn exclusive(&self) -> RwLockWriteGuard<'_, DashMap<RequestId, Transaction>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
