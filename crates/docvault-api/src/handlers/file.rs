//! File handlers: batch upload, listing, rename, delete.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_service::hierarchy::{BatchUploadOutcome, UploadItem};

use crate::dto::request::{RenameRequest, validated};
use crate::dto::response::{ApiResponse, FileSummary, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /folder/files/{folderId} — multipart batch upload.
///
/// Returns the updated folder plus per-item outcomes; a partial failure
/// is still a 200 with the failures listed in `failed`.
pub async fn upload_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(folder_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<BatchUploadOutcome>>, ApiError> {
    let mut items = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("Each part must carry a file name"))?;
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Could not read part '{name}': {e}")))?;
        items.push(UploadItem { name, content });
    }

    let outcome = state.hierarchy.upload_files(&auth, folder_id, items).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// GET /folder/{folderId}/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(folder_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<FileSummary>>>, ApiError> {
    let files = state.hierarchy.list_files(&auth, folder_id).await?;
    Ok(Json(ApiResponse::ok(
        files.into_iter().map(FileSummary::from).collect(),
    )))
}

/// PUT /folder/{folderId}/file/{fileId}
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((folder_id, file_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let req = validated(req)?;
    state
        .hierarchy
        .rename_file(&auth, folder_id, file_id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("File renamed"))))
}

/// DELETE /folder/{folderId}/file/{fileId}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((folder_id, file_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.hierarchy.delete_file(&auth, folder_id, file_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("File deleted"))))
}
