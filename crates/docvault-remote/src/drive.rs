//! Drive-style HTTP remote store.
//!
//! Speaks a Drive-v3-shaped object API: objects are created under a parent
//! container, addressed by opaque string identifiers, and folders are
//! ordinary objects with a folder MIME type.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use docvault_core::config::remote::RemoteStoreConfig;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::remote::{RemoteObjectKind, RemoteObjectStore};

const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// Remote store backed by a Drive-style HTTP API.
#[derive(Debug, Clone)]
pub struct DriveStore {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

/// Minimal object representation returned by the API.
#[derive(Debug, Deserialize)]
struct RemoteObject {
    id: String,
}

impl DriveStore {
    /// Create a new Drive store from configuration.
    ///
    /// The per-call timeout is enforced by the HTTP client; a timed-out
    /// call surfaces as a transient error, never as a confirmed failure.
    pub fn new(config: &RemoteStoreConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn map_transport_error(err: reqwest::Error) -> AppError {
        if err.is_timeout() || err.is_connect() {
            AppError::service_unavailable(format!("Remote store unreachable: {err}"))
        } else {
            AppError::remote_store(format!("Remote store request failed: {err}"))
        }
    }

    /// Map a non-success HTTP status to the error taxonomy. 404 and 410
    /// become `NotFound` so the idempotency wrapper can treat a delete of
    /// an already-removed object as success.
    fn map_status(status: reqwest::StatusCode, context: &str) -> AppError {
        match status.as_u16() {
            404 | 410 => AppError::not_found(format!("{context}: remote object not found")),
            429 | 500..=599 => {
                AppError::service_unavailable(format!("{context}: remote store returned {status}"))
            }
            _ => AppError::remote_store(format!("{context}: remote store returned {status}")),
        }
    }
}

#[async_trait]
impl RemoteObjectStore for DriveStore {
    fn provider_type(&self) -> &str {
        "drive"
    }

    async fn health_check(&self) -> AppResult<bool> {
        let response = self
            .client
            .get(format!("{}/about", self.api_base))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(Self::map_transport_error)?;
        Ok(response.status().is_success())
    }

    async fn create_object(
        &self,
        name: &str,
        kind: RemoteObjectKind,
        parent_id: &str,
        content: Option<Bytes>,
    ) -> AppResult<String> {
        let metadata = match kind {
            RemoteObjectKind::Folder => serde_json::json!({
                "name": name,
                "mimeType": FOLDER_MIME,
                "parents": [parent_id],
            }),
            RemoteObjectKind::File => serde_json::json!({
                "name": name,
                "parents": [parent_id],
            }),
        };

        let response = match kind {
            RemoteObjectKind::Folder => self
                .client
                .post(format!("{}/files", self.api_base))
                .bearer_auth(&self.token)
                .json(&metadata)
                .send()
                .await
                .map_err(Self::map_transport_error)?,
            RemoteObjectKind::File => {
                let media = content.ok_or_else(|| {
                    AppError::validation("File objects require content")
                })?;
                let form = reqwest::multipart::Form::new()
                    .part(
                        "metadata",
                        reqwest::multipart::Part::text(metadata.to_string())
                            .mime_str("application/json")
                            .map_err(|e| AppError::internal(format!("Invalid MIME: {e}")))?,
                    )
                    .part("media", reqwest::multipart::Part::bytes(media.to_vec()));

                self.client
                    .post(format!("{}/files?uploadType=multipart", self.api_base))
                    .bearer_auth(&self.token)
                    .multipart(form)
                    .send()
                    .await
                    .map_err(Self::map_transport_error)?
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status(status, "create"));
        }

        let object: RemoteObject = response
            .json()
            .await
            .map_err(|e| AppError::remote_store(format!("Malformed create response: {e}")))?;
        Ok(object.id)
    }

    async fn rename_object(&self, remote_id: &str, new_name: &str) -> AppResult<()> {
        let response = self
            .client
            .patch(format!("{}/files/{remote_id}", self.api_base))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "name": new_name }))
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status(status, "rename"));
        }
        Ok(())
    }

    async fn delete_object(&self, remote_id: &str) -> AppResult<()> {
        let response = self
            .client
            .delete(format!("{}/files/{remote_id}", self.api_base))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status(status, "delete"));
        }
        Ok(())
    }

    async fn set_public_readable(&self, remote_id: &str) -> AppResult<()> {
        let response = self
            .client
            .post(format!("{}/files/{remote_id}/permissions", self.api_base))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status(status, "set_public_readable"));
        }
        Ok(())
    }

    fn public_url(&self, remote_id: &str) -> String {
        format!("{}/files/{remote_id}?alt=media", self.api_base)
    }
}
