//! The hierarchy manager: every mutation is an ordered two-store saga.
//!
//! There is no shared transaction between the remote blob store and the
//! metadata index. Create and delete run remote-first: an orphaned remote
//! object is tolerable (and cleanable later), a metadata record describing
//! content that does not exist remotely is not. Rename also runs
//! remote-first but is idempotent from the caller's perspective, so a
//! failed attempt can simply be retried.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::remote::{RemoteObjectKind, RemoteObjectStore};
use docvault_entity::folder::{ChildFolder, FileRef, Folder};
use docvault_index::MetadataIndex;

use crate::access::{self, AccessGuard};
use crate::context::RequestContext;
use crate::locks::LockRegistry;

/// Orchestrates folder and file operations across the two stores.
#[derive(Debug)]
pub struct HierarchyManager {
    /// The metadata index (local, authoritative tree).
    pub(crate) index: Arc<dyn MetadataIndex>,
    /// The remote blob store, wrapped with the idempotency retry policy.
    pub(crate) remote: Arc<dyn RemoteObjectStore>,
    /// Ownership resolution.
    pub(crate) guard: AccessGuard,
    /// Per-folder exclusive locks for mutating operations.
    pub(crate) locks: LockRegistry,
    /// Remote container that holds all top-level folders.
    pub(crate) root_container_id: String,
}

/// A remote object addressed during a cascading delete.
struct RemoteTarget {
    remote_id: String,
    label: String,
}

impl HierarchyManager {
    /// Creates a new hierarchy manager.
    pub fn new(
        index: Arc<dyn MetadataIndex>,
        remote: Arc<dyn RemoteObjectStore>,
        root_container_id: impl Into<String>,
    ) -> Self {
        Self {
            guard: AccessGuard::new(Arc::clone(&index)),
            index,
            remote,
            locks: LockRegistry::new(),
            root_container_id: root_container_id.into(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Lists all folders the principal owns. Never touches the remote store.
    pub async fn list_folders(&self, ctx: &RequestContext) -> AppResult<Vec<Folder>> {
        self.index.list_folders(ctx.owner_id).await
    }

    /// Gets a single folder the principal owns.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        self.guard.resolve_folder(ctx, folder_id).await
    }

    /// Lists the files directly inside a folder.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<Vec<FileRef>> {
        let folder = self.guard.resolve_folder(ctx, folder_id).await?;
        Ok(folder.files)
    }

    // ── Create ───────────────────────────────────────────────────

    /// Creates a new top-level folder.
    ///
    /// Saga order: validate name, reject duplicates, create the remote
    /// container, and only then persist the local record referencing it.
    /// The remote create is not retried: an ambiguous outcome is fatal
    /// rather than risking a duplicate remote container.
    pub async fn create_root_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> AppResult<Folder> {
        let name = validated_name(name, "Folder name is required")?;

        // Owner-keyed lock: serializes the duplicate check against
        // concurrent creates by the same principal.
        let _lock = self.locks.acquire(ctx.owner_id).await;

        if self.index.find_by_name(ctx.owner_id, name).await?.is_some() {
            return Err(AppError::validation(
                "Folder with the same name already exists",
            ));
        }

        let remote_id = self
            .remote
            .create_object(name, RemoteObjectKind::Folder, &self.root_container_id, None)
            .await?;

        let folder = Folder::new(ctx.owner_id, name, remote_id);
        self.persist_new(&folder).await?;

        info!(
            owner_id = %ctx.owner_id,
            folder_id = %folder.id,
            name = %folder.name,
            "Folder created"
        );
        Ok(folder)
    }

    /// Creates a child folder inside an existing folder and returns the
    /// updated parent.
    ///
    /// The duplicate check runs against the owner's top-level folder
    /// names, not against sibling child folders; sibling child folders may
    /// repeat a name.
    pub async fn create_child_folder(
        &self,
        ctx: &RequestContext,
        parent_id: Uuid,
        name: &str,
    ) -> AppResult<Folder> {
        let name = validated_name(name, "Folder name is required")?;

        let _lock = self.locks.acquire(parent_id).await;
        let mut parent = self.guard.resolve_folder(ctx, parent_id).await?;

        if self.index.find_by_name(ctx.owner_id, name).await?.is_some() {
            return Err(AppError::validation(
                "Folder with the same name already exists",
            ));
        }

        let remote_id = self
            .remote
            .create_object(
                name,
                RemoteObjectKind::Folder,
                &parent.remote_folder_id,
                None,
            )
            .await?;

        parent.child_folders.push(ChildFolder::new(name, remote_id));
        parent.touch();
        self.persist_update(&parent).await?;

        info!(
            owner_id = %ctx.owner_id,
            parent_id = %parent.id,
            name = %name,
            "Child folder created"
        );
        Ok(parent)
    }

    // ── Rename ───────────────────────────────────────────────────

    /// Renames a top-level folder. Remote first; on failure local state is
    /// unchanged and the caller may retry.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> AppResult<()> {
        let new_name = validated_name(new_name, "Folder name is required")?;

        let _lock = self.locks.acquire(folder_id).await;
        let mut folder = self.guard.resolve_folder(ctx, folder_id).await?;

        self.remote
            .rename_object(&folder.remote_folder_id, new_name)
            .await?;

        folder.name = new_name.to_string();
        folder.touch();
        self.index.update_folder(&folder).await?;

        info!(owner_id = %ctx.owner_id, folder_id = %folder_id, new_name, "Folder renamed");
        Ok(())
    }

    /// Renames a child folder.
    pub async fn rename_child_folder(
        &self,
        ctx: &RequestContext,
        parent_id: Uuid,
        child_id: Uuid,
        new_name: &str,
    ) -> AppResult<()> {
        let new_name = validated_name(new_name, "Folder name is required")?;

        let _lock = self.locks.acquire(parent_id).await;
        let mut parent = self.guard.resolve_folder(ctx, parent_id).await?;
        let remote_id = access::child_of(&parent, child_id)?.remote_folder_id.clone();

        self.remote.rename_object(&remote_id, new_name).await?;

        access::child_of_mut(&mut parent, child_id)?.name = new_name.to_string();
        parent.touch();
        self.index.update_folder(&parent).await?;

        info!(
            owner_id = %ctx.owner_id,
            parent_id = %parent_id,
            child_id = %child_id,
            new_name,
            "Child folder renamed"
        );
        Ok(())
    }

    /// Renames a file directly inside a folder.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        file_id: Uuid,
        new_name: &str,
    ) -> AppResult<()> {
        let new_name = validated_name(new_name, "File name is required")?;

        let _lock = self.locks.acquire(folder_id).await;
        let mut folder = self.guard.resolve_folder(ctx, folder_id).await?;
        let remote_id = access::file_of(&folder, file_id)?.remote_file_id.clone();

        self.remote.rename_object(&remote_id, new_name).await?;

        access::file_of_mut(&mut folder, file_id)?.name = new_name.to_string();
        folder.touch();
        self.index.update_folder(&folder).await?;

        info!(
            owner_id = %ctx.owner_id,
            folder_id = %folder_id,
            file_id = %file_id,
            new_name,
            "File renamed"
        );
        Ok(())
    }

    // ── Delete ───────────────────────────────────────────────────

    /// Deletes a top-level folder and its entire subtree.
    ///
    /// Every descendant's remote object is deleted best-effort before the
    /// local record is removed. If any remote deletion fails the rest are
    /// still attempted, the local subtree is retained (fail-closed), and a
    /// partial-failure error is returned. Because remote deletes converge
    /// on already-removed identifiers, the whole operation is retryable.
    pub async fn delete_root_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<()> {
        let _lock = self.locks.acquire(folder_id).await;
        let folder = self.guard.resolve_folder(ctx, folder_id).await?;

        let mut targets = Vec::new();
        for file in &folder.files {
            targets.push(RemoteTarget {
                remote_id: file.remote_file_id.clone(),
                label: file.name.clone(),
            });
        }
        for child in &folder.child_folders {
            for file in &child.files {
                targets.push(RemoteTarget {
                    remote_id: file.remote_file_id.clone(),
                    label: format!("{}/{}", child.name, file.name),
                });
            }
            targets.push(RemoteTarget {
                remote_id: child.remote_folder_id.clone(),
                label: child.name.clone(),
            });
        }
        targets.push(RemoteTarget {
            remote_id: folder.remote_folder_id.clone(),
            label: folder.name.clone(),
        });

        self.cascade_delete(targets).await?;

        self.index.remove_folder(ctx.owner_id, folder_id).await?;
        info!(owner_id = %ctx.owner_id, folder_id = %folder_id, "Folder deleted");
        Ok(())
    }

    /// Deletes a child folder and its files, then persists the updated
    /// parent.
    pub async fn delete_child_folder(
        &self,
        ctx: &RequestContext,
        parent_id: Uuid,
        child_id: Uuid,
    ) -> AppResult<()> {
        let _lock = self.locks.acquire(parent_id).await;
        let mut parent = self.guard.resolve_folder(ctx, parent_id).await?;
        let child = access::child_of(&parent, child_id)?;

        let mut targets = Vec::new();
        for file in &child.files {
            targets.push(RemoteTarget {
                remote_id: file.remote_file_id.clone(),
                label: file.name.clone(),
            });
        }
        targets.push(RemoteTarget {
            remote_id: child.remote_folder_id.clone(),
            label: child.name.clone(),
        });

        self.cascade_delete(targets).await?;

        parent.remove_child(child_id);
        parent.touch();
        self.index.update_folder(&parent).await?;

        info!(
            owner_id = %ctx.owner_id,
            parent_id = %parent_id,
            child_id = %child_id,
            "Child folder deleted"
        );
        Ok(())
    }

    /// Deletes a file directly inside a folder. Remote first; the local
    /// record is only removed once the remote deletion is confirmed.
    pub async fn delete_file(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        file_id: Uuid,
    ) -> AppResult<()> {
        let _lock = self.locks.acquire(folder_id).await;
        let mut folder = self.guard.resolve_folder(ctx, folder_id).await?;
        let remote_id = access::file_of(&folder, file_id)?.remote_file_id.clone();

        self.remote.delete_object(&remote_id).await?;

        folder.remove_file(file_id);
        folder.touch();
        self.index.update_folder(&folder).await?;

        info!(
            owner_id = %ctx.owner_id,
            folder_id = %folder_id,
            file_id = %file_id,
            "File deleted"
        );
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────

    /// Delete a set of remote objects best-effort. Failures do not stop
    /// the cascade; if any remain at the end, the whole operation fails so
    /// that local state is retained for a later retry.
    async fn cascade_delete(&self, targets: Vec<RemoteTarget>) -> AppResult<()> {
        let total = targets.len();
        let mut failures: Vec<(String, AppError)> = Vec::new();

        for target in targets {
            if let Err(err) = self.remote.delete_object(&target.remote_id).await {
                warn!(
                    remote_id = %target.remote_id,
                    label = %target.label,
                    error = %err,
                    "Remote deletion failed, continuing cascade"
                );
                failures.push((target.label, err));
            }
        }

        if failures.is_empty() {
            return Ok(());
        }

        let (first_label, first_err) = &failures[0];
        Err(AppError::remote_store(format!(
            "Deleted {}/{} remote objects; {} failed (first: '{}': {}); local records retained for retry",
            total - failures.len(),
            total,
            failures.len(),
            first_label,
            first_err.message,
        )))
    }

    /// Persist a brand-new folder record, logging the orphan window if the
    /// local write fails after the remote create succeeded.
    async fn persist_new(&self, folder: &Folder) -> AppResult<()> {
        self.index.insert_folder(folder).await.inspect_err(|_| {
            warn!(
                remote_id = %folder.remote_folder_id,
                "Local insert failed after remote create; remote container orphaned"
            );
        })
    }

    /// Persist an updated folder record, logging newly orphaned remote
    /// objects if the local write fails.
    pub(crate) async fn persist_update(&self, folder: &Folder) -> AppResult<()> {
        self.index.update_folder(folder).await.inspect_err(|_| {
            warn!(
                folder_id = %folder.id,
                "Local update failed after remote create; new remote objects orphaned"
            );
        })
    }
}

/// Reject empty or whitespace-only names.
fn validated_name<'a>(name: &'a str, message: &str) -> AppResult<&'a str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(message.to_string()));
    }
    Ok(trimmed)
}
