//! Folder handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use docvault_entity::folder::Folder;

use crate::dto::request::{CreateFolderRequest, RenameRequest, validated};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /folder
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    let req = validated(req)?;
    let folder = state
        .hierarchy
        .create_root_folder(&auth, &req.folder_name)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// POST /folder/{folderId} — creates a child folder, returns the updated
/// parent.
pub async fn create_child_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(folder_id): Path<Uuid>,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    let req = validated(req)?;
    let parent = state
        .hierarchy
        .create_child_folder(&auth, folder_id, &req.folder_name)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(parent))))
}

/// GET /folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state.hierarchy.list_folders(&auth).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /folder/{folderId}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(folder_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state.hierarchy.get_folder(&auth, folder_id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /folder/{folderId}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(folder_id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let req = validated(req)?;
    state
        .hierarchy
        .rename_folder(&auth, folder_id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Folder renamed"))))
}

/// PUT /folder/{parentId}/childFolder/{childId}
pub async fn rename_child_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((parent_id, child_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let req = validated(req)?;
    state
        .hierarchy
        .rename_child_folder(&auth, parent_id, child_id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Child folder renamed",
    ))))
}

/// DELETE /folder/{folderId}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(folder_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.hierarchy.delete_root_folder(&auth, folder_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Folder deleted"))))
}

/// DELETE /folder/{parentId}/childFolder/{childId}
pub async fn delete_child_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((parent_id, child_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .hierarchy
        .delete_child_folder(&auth, parent_id, child_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Child folder deleted",
    ))))
}
