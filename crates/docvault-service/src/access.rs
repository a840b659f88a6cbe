//! Ownership resolution for every addressed entity.
//!
//! Absence and foreign ownership are indistinguishable: every failed
//! resolution is a plain not-found, at every nesting level, so the
//! existence of another principal's folders is never revealed.

use std::sync::Arc;

use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::folder::{ChildFolder, FileRef, Folder};
use docvault_index::MetadataIndex;

use crate::context::RequestContext;

/// Resolves folders through the metadata index, scoped to the requesting
/// principal.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    index: Arc<dyn MetadataIndex>,
}

impl AccessGuard {
    /// Creates a new access guard over the metadata index.
    pub fn new(index: Arc<dyn MetadataIndex>) -> Self {
        Self { index }
    }

    /// Resolve a folder the principal owns, or a uniform not-found.
    pub async fn resolve_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<Folder> {
        self.index
            .find_folder(ctx.owner_id, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }
}

/// Resolve a child folder inside an already-guarded parent.
pub fn child_of(folder: &Folder, child_id: Uuid) -> AppResult<&ChildFolder> {
    folder
        .child(child_id)
        .ok_or_else(|| AppError::not_found("Child folder not found"))
}

/// Resolve a child folder inside an already-guarded parent, mutably.
pub fn child_of_mut(folder: &mut Folder, child_id: Uuid) -> AppResult<&mut ChildFolder> {
    folder
        .child_mut(child_id)
        .ok_or_else(|| AppError::not_found("Child folder not found"))
}

/// Resolve a file directly inside an already-guarded folder.
pub fn file_of(folder: &Folder, file_id: Uuid) -> AppResult<&FileRef> {
    folder
        .file(file_id)
        .ok_or_else(|| AppError::not_found("File not found"))
}

/// Resolve a file directly inside an already-guarded folder, mutably.
pub fn file_of_mut(folder: &mut Folder, file_id: Uuid) -> AppResult<&mut FileRef> {
    folder
        .file_mut(file_id)
        .ok_or_else(|| AppError::not_found("File not found"))
}
