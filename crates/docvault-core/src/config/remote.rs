//! Remote blob-store configuration.

use serde::{Deserialize, Serialize};

/// Remote blob-store configuration.
///
/// The root container identifier is supplied here rather than embedded in
/// the hierarchy logic: every top-level folder is created under
/// `root_folder_id`, child folders under their parent's remote identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStoreConfig {
    /// Remote provider: `"drive"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the Drive-style object API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Bearer token for the service account.
    #[serde(default)]
    pub token: String,
    /// Remote identifier of the container that holds all top-level folders.
    #[serde(default)]
    pub root_folder_id: String,
    /// Per-call timeout in seconds. A timeout surfaces as a transient
    /// error, distinct from a confirmed remote failure.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Maximum retry attempts for idempotent operations (rename, delete).
    /// Create is never retried.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds (doubled per attempt).
    #[serde(default = "default_retry_delay")]
    pub retry_base_delay_ms: u64,
}

impl Default for RemoteStoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_base: default_api_base(),
            token: String::new(),
            root_folder_id: String::new(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_delay(),
        }
    }
}

fn default_provider() -> String {
    "drive".to_string()
}

fn default_api_base() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    250
}
