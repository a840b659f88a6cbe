//! # docvault-remote
//!
//! Remote blob-store adapters. The [`drive`] module talks to a Drive-style
//! HTTP object API; the [`memory`] module is an in-process store for tests
//! and local development. Both are wrapped in [`idempotent::IdempotentRemote`],
//! which supplies the retry contract the hierarchy logic relies on.

pub mod drive;
pub mod idempotent;
pub mod memory;

use std::sync::Arc;

use tracing::info;

use docvault_core::config::remote::RemoteStoreConfig;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::remote::RemoteObjectStore;

use crate::idempotent::IdempotentRemote;

/// Construct the configured remote store, wrapped with the idempotency
/// retry policy.
pub fn connect(config: &RemoteStoreConfig) -> AppResult<Arc<dyn RemoteObjectStore>> {
    let inner: Arc<dyn RemoteObjectStore> = match config.provider.as_str() {
        "drive" => {
            info!(api_base = %config.api_base, "Initializing Drive remote store");
            Arc::new(drive::DriveStore::new(config)?)
        }
        "memory" => {
            info!("Initializing in-memory remote store");
            Arc::new(memory::InMemoryRemote::new())
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown remote provider: '{other}'. Supported: drive, memory"
            )));
        }
    };

    Ok(Arc::new(IdempotentRemote::new(
        inner,
        config.max_retries,
        std::time::Duration::from_millis(config.retry_base_delay_ms),
    )))
}
