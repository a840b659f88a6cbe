//! In-memory metadata index for tests and local development.

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::folder::Folder;

use crate::MetadataIndex;

/// Metadata index held entirely in process memory.
///
/// Mirrors the PostgreSQL provider's semantics, including the per-owner
/// top-level name uniqueness constraint on insert.
#[derive(Debug, Default)]
pub struct MemoryMetadataIndex {
    folders: DashMap<Uuid, Folder>,
    /// Folder names for which `insert_folder` fails with a database error.
    fail_insert_names: DashSet<String>,
}

impl MemoryMetadataIndex {
    /// Create a new empty in-memory index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `insert_folder` with this name fail with a database
    /// error, simulating a local write failure after the remote create.
    pub fn fail_inserts_named(&self, name: &str) {
        self.fail_insert_names.insert(name.to_string());
    }
}

#[async_trait]
impl MetadataIndex for MemoryMetadataIndex {
    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn find_folder(&self, owner_id: Uuid, folder_id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self
            .folders
            .get(&folder_id)
            .filter(|f| f.owner_id == owner_id)
            .map(|f| f.clone()))
    }

    async fn find_by_name(&self, owner_id: Uuid, name: &str) -> AppResult<Option<Folder>> {
        Ok(self
            .folders
            .iter()
            .find(|f| f.owner_id == owner_id && f.name == name)
            .map(|f| f.clone()))
    }

    async fn list_folders(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        let mut folders: Vec<Folder> = self
            .folders
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .map(|f| f.clone())
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    async fn insert_folder(&self, folder: &Folder) -> AppResult<()> {
        if self.find_by_name(folder.owner_id, &folder.name).await?.is_some() {
            return Err(AppError::validation(
                "Folder with the same name already exists",
            ));
        }
        if self.fail_insert_names.contains(&folder.name) {
            return Err(AppError::database(format!(
                "insert rejected for '{}'",
                folder.name
            )));
        }
        self.folders.insert(folder.id, folder.clone());
        Ok(())
    }

    async fn update_folder(&self, folder: &Folder) -> AppResult<()> {
        match self.folders.get_mut(&folder.id) {
            Some(mut entry) if entry.owner_id == folder.owner_id => {
                *entry = folder.clone();
                Ok(())
            }
            _ => Err(AppError::not_found("Folder not found")),
        }
    }

    async fn remove_folder(&self, owner_id: Uuid, folder_id: Uuid) -> AppResult<bool> {
        Ok(self
            .folders
            .remove_if(&folder_id, |_, f| f.owner_id == owner_id)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_rejects_duplicate_name_per_owner() {
        let index = MemoryMetadataIndex::new();
        let owner = Uuid::new_v4();

        index
            .insert_folder(&Folder::new(owner, "Photos", "r1"))
            .await
            .unwrap();

        let err = index
            .insert_folder(&Folder::new(owner, "Photos", "r2"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Folder with the same name already exists");

        // Same name under a different owner is fine.
        index
            .insert_folder(&Folder::new(Uuid::new_v4(), "Photos", "r3"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn reads_are_owner_scoped() {
        let index = MemoryMetadataIndex::new();
        let owner = Uuid::new_v4();
        let folder = Folder::new(owner, "Docs", "r1");
        index.insert_folder(&folder).await.unwrap();

        let other = Uuid::new_v4();
        assert!(index.find_folder(other, folder.id).await.unwrap().is_none());
        assert!(index.list_folders(other).await.unwrap().is_empty());
        assert!(!index.remove_folder(other, folder.id).await.unwrap());
        assert!(index.find_folder(owner, folder.id).await.unwrap().is_some());
    }
}
