//! PostgreSQL metadata index implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::folder::{ChildFolder, FileRef, Folder};

use crate::MetadataIndex;

/// Metadata index backed by a PostgreSQL `folders` table with JSONB
/// columns for the embedded file and child-folder documents.
#[derive(Debug, Clone)]
pub struct PgMetadataIndex {
    pool: PgPool,
}

/// Row shape of the `folders` table.
#[derive(Debug, sqlx::FromRow)]
struct FolderRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    remote_folder_id: String,
    files: Json<Vec<FileRef>>,
    child_folders: Json<Vec<ChildFolder>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FolderRow> for Folder {
    fn from(row: FolderRow) -> Self {
        Folder {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            remote_folder_id: row.remote_folder_id,
            files: row.files.0,
            child_folders: row.child_folders.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl PgMetadataIndex {
    /// Create a new PostgreSQL metadata index over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetadataIndex for PgMetadataIndex {
    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    async fn find_folder(&self, owner_id: Uuid, folder_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, FolderRow>("SELECT * FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(folder_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Folder::from))
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_name(&self, owner_id: Uuid, name: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, FolderRow>("SELECT * FROM folders WHERE owner_id = $1 AND name = $2")
            .bind(owner_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Folder::from))
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find folder by name", e)
            })
    }

    async fn list_folders(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, FolderRow>(
            "SELECT * FROM folders WHERE owner_id = $1 ORDER BY name ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map(|rows| rows.into_iter().map(Folder::from).collect())
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn insert_folder(&self, folder: &Folder) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO folders \
                (id, owner_id, name, remote_folder_id, files, child_folders, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(folder.id)
        .bind(folder.owner_id)
        .bind(&folder.name)
        .bind(&folder.remote_folder_id)
        .bind(Json(&folder.files))
        .bind(Json(&folder.child_folders))
        .bind(folder.created_at)
        .bind(folder.updated_at)
        .execute(&self.pool)
        .await
        .map(|_| ())
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_owner_id_name_key") =>
            {
                AppError::validation("Folder with the same name already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert folder", e),
        })
    }

    async fn update_folder(&self, folder: &Folder) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE folders \
             SET name = $3, files = $4, child_folders = $5, updated_at = $6 \
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(folder.id)
        .bind(folder.owner_id)
        .bind(&folder.name)
        .bind(Json(&folder.files))
        .bind(Json(&folder.child_folders))
        .bind(folder.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update folder", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Folder not found"));
        }
        Ok(())
    }

    async fn remove_folder(&self, owner_id: Uuid, folder_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(folder_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
