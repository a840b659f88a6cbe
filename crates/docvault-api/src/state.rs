//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use docvault_core::config::AppConfig;
use docvault_core::traits::remote::RemoteObjectStore;
use docvault_index::MetadataIndex;
use docvault_service::HierarchyManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Metadata index (PostgreSQL or in-memory)
    pub index: Arc<dyn MetadataIndex>,
    /// Remote blob store (Drive or in-memory), retry-wrapped
    pub remote: Arc<dyn RemoteObjectStore>,
    /// The hierarchy manager all folder/file operations go through
    pub hierarchy: Arc<HierarchyManager>,
}

impl AppState {
    /// Wires the state from already-constructed stores.
    pub fn new(
        config: AppConfig,
        index: Arc<dyn MetadataIndex>,
        remote: Arc<dyn RemoteObjectStore>,
    ) -> Self {
        let hierarchy = Arc::new(HierarchyManager::new(
            Arc::clone(&index),
            Arc::clone(&remote),
            config.remote.root_folder_id.clone(),
        ));
        Self {
            config: Arc::new(config),
            index,
            remote,
            hierarchy,
        }
    }
}
