//! In-memory remote store for tests and local development.
//!
//! Behaves like the raw Drive backend (delete of a missing identifier is a
//! not-found error, not success) and supports failure injection so the
//! saga failure windows can be exercised deterministically.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::{DashMap, DashSet};

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::remote::{RemoteObjectKind, RemoteObjectStore};

/// A stored remote object.
#[derive(Debug, Clone)]
struct StoredObject {
    name: String,
    kind: RemoteObjectKind,
    parent_id: String,
    content_len: usize,
    public: bool,
}

/// Remote store held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    objects: DashMap<String, StoredObject>,
    next_id: AtomicU64,
    /// Names for which `create_object` fails with a confirmed error.
    fail_create_names: DashSet<String>,
    /// Remote ids for which `delete_object` fails with a confirmed error.
    fail_delete_ids: DashSet<String>,
    /// Remaining injected transient failures per remote id.
    transient_failures: DashMap<String, u32>,
}

impl InMemoryRemote {
    /// Create a new empty in-memory remote store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `create_object` with this name fail with a confirmed
    /// remote error.
    pub fn fail_creates_named(&self, name: &str) {
        self.fail_create_names.insert(name.to_string());
    }

    /// Make every `delete_object` of this identifier fail with a confirmed
    /// remote error.
    pub fn fail_deletes_of(&self, remote_id: &str) {
        self.fail_delete_ids.insert(remote_id.to_string());
    }

    /// Inject `count` transient failures for the next operations that
    /// address this identifier.
    pub fn inject_transient_failures(&self, remote_id: &str, count: u32) {
        self.transient_failures.insert(remote_id.to_string(), count);
    }

    /// Remove all injected failures, simulating a recovered backend.
    pub fn clear_injected_failures(&self) {
        self.fail_create_names.clear();
        self.fail_delete_ids.clear();
        self.transient_failures.clear();
    }

    /// Current name of an object, if it exists.
    pub fn object_name(&self, remote_id: &str) -> Option<String> {
        self.objects.get(remote_id).map(|o| o.name.clone())
    }

    /// Whether an object exists.
    pub fn contains(&self, remote_id: &str) -> bool {
        self.objects.contains_key(remote_id)
    }

    /// Kind of an object, if it exists.
    pub fn object_kind(&self, remote_id: &str) -> Option<RemoteObjectKind> {
        self.objects.get(remote_id).map(|o| o.kind)
    }

    /// Whether an object has been made publicly readable.
    pub fn is_public(&self, remote_id: &str) -> bool {
        self.objects.get(remote_id).map(|o| o.public).unwrap_or(false)
    }

    /// Total number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Remote ids of objects stored under a parent container.
    pub fn ids_under(&self, parent_id: &str) -> Vec<String> {
        self.objects
            .iter()
            .filter(|entry| entry.value().parent_id == parent_id)
            .map(|entry| entry.key().clone())
            .collect()
    }

    fn take_transient(&self, remote_id: &str) -> bool {
        if let Some(mut remaining) = self.transient_failures.get_mut(remote_id) {
            if *remaining > 0 {
                *remaining -= 1;
                return true;
            }
        }
        false
    }
}

#[async_trait]
impl RemoteObjectStore for InMemoryRemote {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn create_object(
        &self,
        name: &str,
        kind: RemoteObjectKind,
        parent_id: &str,
        content: Option<Bytes>,
    ) -> AppResult<String> {
        if self.fail_create_names.contains(name) {
            return Err(AppError::remote_store(format!(
                "create rejected for '{name}'"
            )));
        }
        if kind == RemoteObjectKind::File && content.is_none() {
            return Err(AppError::validation("File objects require content"));
        }

        let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.objects.insert(
            id.clone(),
            StoredObject {
                name: name.to_string(),
                kind,
                parent_id: parent_id.to_string(),
                content_len: content.map(|c| c.len()).unwrap_or(0),
                public: false,
            },
        );
        Ok(id)
    }

    async fn rename_object(&self, remote_id: &str, new_name: &str) -> AppResult<()> {
        if self.take_transient(remote_id) {
            return Err(AppError::service_unavailable("injected transient failure"));
        }
        match self.objects.get_mut(remote_id) {
            Some(mut object) => {
                object.name = new_name.to_string();
                Ok(())
            }
            None => Err(AppError::not_found("rename: remote object not found")),
        }
    }

    async fn delete_object(&self, remote_id: &str) -> AppResult<()> {
        if self.take_transient(remote_id) {
            return Err(AppError::service_unavailable("injected transient failure"));
        }
        if self.fail_delete_ids.contains(remote_id) {
            return Err(AppError::remote_store(format!(
                "delete rejected for '{remote_id}'"
            )));
        }
        match self.objects.remove(remote_id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("delete: remote object not found")),
        }
    }

    async fn set_public_readable(&self, remote_id: &str) -> AppResult<()> {
        match self.objects.get_mut(remote_id) {
            Some(mut object) => {
                object.public = true;
                Ok(())
            }
            None => Err(AppError::not_found(
                "set_public_readable: remote object not found",
            )),
        }
    }

    fn public_url(&self, remote_id: &str) -> String {
        format!("https://blobs.local/{remote_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_creation_requires_content() {
        let remote = InMemoryRemote::new();
        assert!(remote
            .create_object("a.txt", RemoteObjectKind::File, "root", None)
            .await
            .is_err());

        let id = remote
            .create_object(
                "a.txt",
                RemoteObjectKind::File,
                "root",
                Some(Bytes::from_static(b"hello")),
            )
            .await
            .unwrap();
        assert!(remote.contains(&id));
        assert_eq!(remote.objects.get(&id).unwrap().content_len, 5);
    }

    #[tokio::test]
    async fn injected_create_failure_creates_nothing() {
        let remote = InMemoryRemote::new();
        remote.fail_creates_named("bad.bin");
        assert!(remote
            .create_object(
                "bad.bin",
                RemoteObjectKind::File,
                "root",
                Some(Bytes::from_static(b"x")),
            )
            .await
            .is_err());
        assert_eq!(remote.object_count(), 0);
    }
}
