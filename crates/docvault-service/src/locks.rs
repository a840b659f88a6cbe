//! Per-folder lock registry.
//!
//! Mutations within a single folder's subtree must be serialized against
//! each other to prevent lost updates on the embedded file and
//! child-folder lists. Requests across different owners or folders share
//! nothing and proceed independently.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Registry of exclusive locks keyed by folder id (or owner id for
/// operations that create top-level folders).
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl LockRegistry {
    /// Creates an empty lock registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive lock for a key, waiting if another operation
    /// on the same subtree is in flight.
    pub async fn acquire(&self, key: Uuid) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
