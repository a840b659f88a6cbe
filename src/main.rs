//! DocVault Server — per-user hierarchical document vault
//!
//! Main entry point that wires configuration, the metadata index, the
//! remote blob store, and the HTTP layer together, then serves until
//! shutdown.

use tracing_subscriber::{EnvFilter, fmt};

use docvault_api::state::AppState;
use docvault_core::config::AppConfig;
use docvault_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("DOCVAULT_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocVault v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        "Initializing metadata index (provider: {})...",
        config.index.provider
    );
    let index = docvault_index::connect(&config.index).await?;

    tracing::info!(
        "Initializing remote blob store (provider: {})...",
        config.remote.provider
    );
    let remote = docvault_remote::connect(&config.remote)?;

    let state = AppState::new(config, index, remote);
    docvault_api::app::run_server(state).await?;

    tracing::info!("DocVault shut down gracefully");
    Ok(())
}
