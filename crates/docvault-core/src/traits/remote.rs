//! Remote blob-store trait for pluggable object-storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// The kind of remote object being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RemoteObjectKind {
    /// An opaque blob holding file content.
    File,
    /// A container that other objects are created under.
    Folder,
}

/// Trait for the external blob store the vault mirrors into.
///
/// The trait is defined here in `docvault-core` and implemented in
/// `docvault-remote`. Contract the hierarchy logic relies on:
///
/// - [`create_object`](RemoteObjectStore::create_object) is **not**
///   idempotent. Callers must never retry it after an ambiguous failure;
///   a duplicate remote object would otherwise be created.
/// - [`rename_object`](RemoteObjectStore::rename_object) and
///   [`delete_object`](RemoteObjectStore::delete_object) must behave
///   idempotently from the caller's viewpoint. Deleting an identifier that
///   is already gone is success, not an error, so cascading deletes can be
///   retried safely. The `IdempotentRemote` wrapper in `docvault-remote`
///   enforces this on top of raw backends.
#[async_trait]
pub trait RemoteObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "drive", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the remote store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Create an object under the given parent container and return its
    /// opaque remote identifier. `content` is required for files and
    /// ignored for folders.
    async fn create_object(
        &self,
        name: &str,
        kind: RemoteObjectKind,
        parent_id: &str,
        content: Option<Bytes>,
    ) -> AppResult<String>;

    /// Rename an existing remote object.
    async fn rename_object(&self, remote_id: &str, new_name: &str) -> AppResult<()>;

    /// Delete a remote object.
    async fn delete_object(&self, remote_id: &str) -> AppResult<()>;

    /// Make an object readable without credentials.
    async fn set_public_readable(&self, remote_id: &str) -> AppResult<()>;

    /// Return the public URL at which a remote object can be fetched once
    /// [`set_public_readable`](RemoteObjectStore::set_public_readable) has
    /// been applied.
    fn public_url(&self, remote_id: &str) -> String;
}
