//! Folder tree entity model.
//!
//! A [`Folder`] is the unit of persistence: its child folders and file
//! references are embedded documents that are saved and removed as part of
//! a folder write, never independently. Nesting depth is fixed at two
//! levels (root folder, optional child folder).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reference to a file mirrored in the remote blob store.
///
/// A `FileRef` exists only inside exactly one [`Folder`] or
/// [`ChildFolder`]. It is never written to the metadata index unless the
/// backing remote object was confirmed created first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    /// Unique file identifier.
    pub id: Uuid,
    /// File name.
    pub name: String,
    /// Public URL at which the remote content can be fetched.
    pub url: String,
    /// Opaque identifier of the backing remote object.
    pub remote_file_id: String,
}

/// A folder nested inside a root [`Folder`].
///
/// Child folders have no independent lifecycle and no deeper nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildFolder {
    /// Unique child-folder identifier.
    pub id: Uuid,
    /// Child folder name. Uniqueness among siblings is not enforced.
    pub name: String,
    /// Opaque identifier of the backing remote container.
    pub remote_folder_id: String,
    /// Files contained in this child folder.
    pub files: Vec<FileRef>,
}

impl ChildFolder {
    /// Create a new empty child folder backed by the given remote container.
    pub fn new(name: impl Into<String>, remote_folder_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            remote_folder_id: remote_folder_id.into(),
            files: Vec::new(),
        }
    }
}

/// A top-level folder owned by exactly one principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The owning principal. Immutable; determines all visibility and
    /// mutation rights over the folder and its descendants.
    pub owner_id: Uuid,
    /// Folder name, unique among the owner's top-level folders.
    pub name: String,
    /// Opaque identifier of the backing remote container.
    pub remote_folder_id: String,
    /// Files directly inside this folder.
    pub files: Vec<FileRef>,
    /// Nested child folders.
    #[serde(rename = "childFolder")]
    pub child_folders: Vec<ChildFolder>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Create a new empty folder backed by the given remote container.
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        remote_folder_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            remote_folder_id: remote_folder_id.into(),
            files: Vec::new(),
            child_folders: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Find a file directly inside this folder.
    pub fn file(&self, file_id: Uuid) -> Option<&FileRef> {
        self.files.iter().find(|f| f.id == file_id)
    }

    /// Find a file directly inside this folder, mutably.
    pub fn file_mut(&mut self, file_id: Uuid) -> Option<&mut FileRef> {
        self.files.iter_mut().find(|f| f.id == file_id)
    }

    /// Remove a file from this folder, returning it if present.
    pub fn remove_file(&mut self, file_id: Uuid) -> Option<FileRef> {
        let idx = self.files.iter().position(|f| f.id == file_id)?;
        Some(self.files.remove(idx))
    }

    /// Find a child folder by id.
    pub fn child(&self, child_id: Uuid) -> Option<&ChildFolder> {
        self.child_folders.iter().find(|c| c.id == child_id)
    }

    /// Find a child folder by id, mutably.
    pub fn child_mut(&mut self, child_id: Uuid) -> Option<&mut ChildFolder> {
        self.child_folders.iter_mut().find(|c| c.id == child_id)
    }

    /// Remove a child folder, returning it if present.
    pub fn remove_child(&mut self, child_id: Uuid) -> Option<ChildFolder> {
        let idx = self.child_folders.iter().position(|c| c.id == child_id)?;
        Some(self.child_folders.remove(idx))
    }

    /// Mark the folder as modified.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_file_returns_the_removed_ref() {
        let mut folder = Folder::new(Uuid::new_v4(), "Photos", "remote-1");
        let file = FileRef {
            id: Uuid::new_v4(),
            name: "cat.jpg".to_string(),
            url: "https://blobs.example/f1".to_string(),
            remote_file_id: "f1".to_string(),
        };
        folder.files.push(file.clone());

        assert_eq!(folder.remove_file(file.id), Some(file));
        assert!(folder.files.is_empty());
        assert_eq!(folder.remove_file(Uuid::new_v4()), None);
    }

    #[test]
    fn wire_format_matches_original_api() {
        let folder = Folder::new(Uuid::new_v4(), "Docs", "remote-2");
        let json = serde_json::to_value(&folder).unwrap();
        assert!(json.get("remoteFolderId").is_some());
        assert!(json.get("childFolder").is_some());
        assert!(json.get("ownerId").is_some());
    }
}
