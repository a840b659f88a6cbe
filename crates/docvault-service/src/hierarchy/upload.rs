//! Batch file upload with per-item outcomes.
//!
//! Remote uploads run concurrently; the single metadata write happens
//! afterwards under the folder lock, against a freshly re-read record, so
//! concurrent mutations of the same folder are never lost.

use bytes::Bytes;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::remote::RemoteObjectKind;
use docvault_entity::folder::{FileRef, Folder};

use crate::context::RequestContext;
use crate::hierarchy::HierarchyManager;

/// One file to upload.
#[derive(Debug, Clone)]
pub struct UploadItem {
    pub name: String,
    pub content: Bytes,
}

/// A file that could not be uploaded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedUpload {
    pub name: String,
    pub reason: String,
}

/// Outcome of a batch upload: the updated folder plus per-item results.
/// Successes are never discarded because other items failed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadOutcome {
    pub folder: Folder,
    pub uploaded: Vec<FileRef>,
    pub failed: Vec<FailedUpload>,
}

impl HierarchyManager {
    /// Uploads a batch of files into a folder.
    ///
    /// Remote object creation runs concurrently per item; each item
    /// succeeds or fails on its own. The folder record is re-read under
    /// the folder lock before the successes are appended in one write.
    pub async fn upload_files(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        items: Vec<UploadItem>,
    ) -> AppResult<BatchUploadOutcome> {
        let folder = self.guard.resolve_folder(ctx, folder_id).await?;
        let parent_remote_id = folder.remote_folder_id.clone();

        let uploads = items
            .into_iter()
            .map(|item| self.upload_one(parent_remote_id.clone(), item));
        let mut uploaded = Vec::new();
        let mut failed = Vec::new();
        for outcome in join_all(uploads).await {
            match outcome {
                Ok(file) => uploaded.push(file),
                Err(failure) => failed.push(failure),
            }
        }

        if uploaded.is_empty() {
            return Ok(BatchUploadOutcome {
                folder,
                uploaded,
                failed,
            });
        }

        // Re-read under the lock: the resolve above ran unlocked and the
        // folder may have changed while the uploads were in flight.
        let _lock = self.locks.acquire(folder_id).await;
        let mut folder = self.guard.resolve_folder(ctx, folder_id).await.inspect_err(|_| {
            warn!(
                folder_id = %folder_id,
                count = uploaded.len(),
                "Folder vanished during upload; new remote objects orphaned"
            );
        })?;
        folder.files.extend(uploaded.iter().cloned());
        folder.touch();
        self.persist_update(&folder).await?;

        info!(
            owner_id = %ctx.owner_id,
            folder_id = %folder_id,
            uploaded = uploaded.len(),
            failed = failed.len(),
            "Batch upload finished"
        );
        Ok(BatchUploadOutcome {
            folder,
            uploaded,
            failed,
        })
    }

    /// Upload a single item: create the remote object, make it publicly
    /// readable, and build the file record.
    async fn upload_one(
        &self,
        parent_remote_id: String,
        item: UploadItem,
    ) -> Result<FileRef, FailedUpload> {
        let name = item.name.trim().to_string();
        if name.is_empty() {
            return Err(FailedUpload {
                name: item.name,
                reason: "File name is required".to_string(),
            });
        }

        let remote_id = self
            .remote
            .create_object(
                &name,
                RemoteObjectKind::File,
                &parent_remote_id,
                Some(item.content),
            )
            .await
            .map_err(|err| FailedUpload {
                name: name.clone(),
                reason: err.message.clone(),
            })?;

        // The content is confirmed to exist remotely, so a failed
        // visibility grant downgrades to a warning rather than dropping
        // the record.
        if let Err(err) = self.remote.set_public_readable(&remote_id).await {
            warn!(
                remote_id = %remote_id,
                name = %name,
                error = %err,
                "Could not make uploaded file publicly readable"
            );
        }

        Ok(FileRef {
            id: Uuid::new_v4(),
            name,
            url: self.remote.public_url(&remote_id),
            remote_file_id: remote_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use docvault_core::error::ErrorKind;
    use docvault_core::traits::remote::RemoteObjectStore;
    use docvault_index::memory::MemoryMetadataIndex;
    use docvault_index::MetadataIndex;
    use docvault_remote::idempotent::IdempotentRemote;
    use docvault_remote::memory::InMemoryRemote;

    use super::*;

    fn setup() -> (HierarchyManager, Arc<InMemoryRemote>) {
        let raw = Arc::new(InMemoryRemote::new());
        let remote: Arc<dyn RemoteObjectStore> = Arc::new(IdempotentRemote::new(
            Arc::clone(&raw) as Arc<dyn RemoteObjectStore>,
            2,
            Duration::from_millis(1),
        ));
        let index: Arc<dyn MetadataIndex> = Arc::new(MemoryMetadataIndex::new());
        (HierarchyManager::new(index, remote, "container-root"), raw)
    }

    fn item(name: &str, content: &'static [u8]) -> UploadItem {
        UploadItem {
            name: name.to_string(),
            content: Bytes::from_static(content),
        }
    }

    #[tokio::test]
    async fn uploads_land_in_both_stores_with_public_urls() {
        let (manager, remote) = setup();
        let owner = RequestContext::new(Uuid::new_v4());
        let folder = manager.create_root_folder(&owner, "Docs").await.unwrap();

        let outcome = manager
            .upload_files(
                &owner,
                folder.id,
                vec![item("a.txt", b"aaa"), item("b.txt", b"bbb")],
            )
            .await
            .unwrap();

        assert_eq!(outcome.uploaded.len(), 2);
        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.folder.files.len(), 2);
        for file in &outcome.folder.files {
            assert!(remote.contains(&file.remote_file_id));
            assert!(remote.is_public(&file.remote_file_id));
            assert_eq!(file.url, remote.public_url(&file.remote_file_id));
        }

        let files = manager.list_files(&owner, folder.id).await.unwrap();
        assert_eq!(files.len(), 2);
    }

    #[tokio::test]
    async fn one_failed_item_does_not_discard_the_others() {
        let (manager, remote) = setup();
        let owner = RequestContext::new(Uuid::new_v4());
        let folder = manager.create_root_folder(&owner, "Docs").await.unwrap();

        remote.fail_creates_named("two.txt");
        let outcome = manager
            .upload_files(
                &owner,
                folder.id,
                vec![
                    item("one.txt", b"1"),
                    item("two.txt", b"2"),
                    item("three.txt", b"3"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(outcome.uploaded.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].name, "two.txt");

        let names: Vec<_> = outcome.folder.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["one.txt", "three.txt"]);
    }

    #[tokio::test]
    async fn nameless_items_fail_without_touching_the_remote_store() {
        let (manager, remote) = setup();
        let owner = RequestContext::new(Uuid::new_v4());
        let folder = manager.create_root_folder(&owner, "Docs").await.unwrap();
        let before = remote.object_count();

        let outcome = manager
            .upload_files(&owner, folder.id, vec![item("  ", b"x")])
            .await
            .unwrap();

        assert!(outcome.uploaded.is_empty());
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].reason, "File name is required");
        assert_eq!(remote.object_count(), before);
    }

    #[tokio::test]
    async fn empty_batch_returns_the_folder_unchanged() {
        let (manager, _) = setup();
        let owner = RequestContext::new(Uuid::new_v4());
        let folder = manager.create_root_folder(&owner, "Docs").await.unwrap();

        let outcome = manager.upload_files(&owner, folder.id, vec![]).await.unwrap();
        assert!(outcome.uploaded.is_empty());
        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.folder.id, folder.id);
    }

    #[tokio::test]
    async fn upload_into_a_foreign_folder_is_not_found() {
        let (manager, _) = setup();
        let u1 = RequestContext::new(Uuid::new_v4());
        let u2 = RequestContext::new(Uuid::new_v4());
        let folder = manager.create_root_folder(&u1, "Docs").await.unwrap();

        let err = manager
            .upload_files(&u2, folder.id, vec![item("a.txt", b"x")])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn rename_and_delete_reach_uploaded_files() {
        let (manager, remote) = setup();
        let owner = RequestContext::new(Uuid::new_v4());
        let folder = manager.create_root_folder(&owner, "Docs").await.unwrap();

        let outcome = manager
            .upload_files(&owner, folder.id, vec![item("draft.txt", b"x")])
            .await
            .unwrap();
        let file = outcome.uploaded[0].clone();

        manager
            .rename_file(&owner, folder.id, file.id, "final.txt")
            .await
            .unwrap();
        assert_eq!(remote.object_name(&file.remote_file_id).as_deref(), Some("final.txt"));

        manager.delete_file(&owner, folder.id, file.id).await.unwrap();
        assert!(!remote.contains(&file.remote_file_id));
        assert!(manager.list_files(&owner, folder.id).await.unwrap().is_empty());
    }
}
