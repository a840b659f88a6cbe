//! Request DTOs.

use serde::Deserialize;
use validator::Validate;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;

/// Body of `POST /folder` and `POST /folder/{folderId}`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Name of the folder to create.
    #[validate(length(min = 1, max = 255, message = "folderName must be 1-255 characters"))]
    pub folder_name: String,
}

/// Body of the rename endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameRequest {
    /// New name for the folder or file.
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
}

/// Run validator-derive checks, mapping failures to a validation error.
pub fn validated<T: Validate>(req: T) -> AppResult<T> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(req)
}
