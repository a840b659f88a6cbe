//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_entity::folder::FileRef;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// File entry returned by `GET /folder/{folderId}/files`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    /// File ID.
    pub id: Uuid,
    /// File name.
    pub name: String,
    /// Public URL of the remote content.
    pub url: String,
}

impl From<FileRef> for FileSummary {
    fn from(file: FileRef) -> Self {
        Self {
            id: file.id,
            name: file.name,
            url: file.url,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Metadata index status.
    pub index: String,
    /// Remote blob store status.
    pub remote: String,
}
