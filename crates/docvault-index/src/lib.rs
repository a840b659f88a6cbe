//! # docvault-index
//!
//! The metadata index: the authoritative persisted record of each owner's
//! folder tree, separate from the remote blob store. A [`Folder`] with its
//! embedded child folders and file references is the unit of persistence.
//!
//! Two providers exist: PostgreSQL (production) and in-memory (tests and
//! local development), selected at construction time from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use docvault_core::config::IndexConfig;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::folder::Folder;

/// Persistence operations over the folder tree.
///
/// Every read is scoped by `owner_id`; a folder belonging to a different
/// principal is indistinguishable from an absent one at this layer.
#[async_trait]
pub trait MetadataIndex: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether the index is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Find a folder by id, scoped to its owner.
    async fn find_folder(&self, owner_id: Uuid, folder_id: Uuid) -> AppResult<Option<Folder>>;

    /// Find a top-level folder by exact name, scoped to its owner.
    async fn find_by_name(&self, owner_id: Uuid, name: &str) -> AppResult<Option<Folder>>;

    /// List all folders belonging to an owner, ordered by name.
    async fn list_folders(&self, owner_id: Uuid) -> AppResult<Vec<Folder>>;

    /// Persist a newly created folder.
    ///
    /// Fails with a `Validation` error if the owner already has a top-level
    /// folder with the same name.
    async fn insert_folder(&self, folder: &Folder) -> AppResult<()>;

    /// Persist the current state of an existing folder, including its
    /// embedded child folders and file references.
    async fn update_folder(&self, folder: &Folder) -> AppResult<()>;

    /// Remove a folder record. Returns `true` if a record was removed.
    async fn remove_folder(&self, owner_id: Uuid, folder_id: Uuid) -> AppResult<bool>;
}

/// Construct the configured metadata index provider.
pub async fn connect(config: &IndexConfig) -> AppResult<Arc<dyn MetadataIndex>> {
    match config.provider.as_str() {
        "postgres" => {
            info!("Initializing PostgreSQL metadata index");
            let pool = connection::connect_pool(config).await?;
            migration::run_migrations(&pool).await?;
            Ok(Arc::new(postgres::PgMetadataIndex::new(pool)))
        }
        "memory" => {
            info!("Initializing in-memory metadata index");
            Ok(Arc::new(memory::MemoryMetadataIndex::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown index provider: '{other}'. Supported: postgres, memory"
        ))),
    }
}
