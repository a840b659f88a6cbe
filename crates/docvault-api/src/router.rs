//! Route definitions for the DocVault HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor. Route shapes match the original document
//! API: `/folder` for mutations, `/folders` for the owner-scoped list.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Folder CRUD and child-folder endpoints
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", get(handlers::folder::list_folders))
        .route("/folder", post(handlers::folder::create_folder))
        .route("/folder/{folder_id}", post(handlers::folder::create_child_folder))
        .route("/folder/{folder_id}", get(handlers::folder::get_folder))
        .route("/folder/{folder_id}", put(handlers::folder::rename_folder))
        .route("/folder/{folder_id}", delete(handlers::folder::delete_folder))
        .route(
            "/folder/{parent_id}/childFolder/{child_id}",
            put(handlers::folder::rename_child_folder),
        )
        .route(
            "/folder/{parent_id}/childFolder/{child_id}",
            delete(handlers::folder::delete_child_folder),
        )
}

/// File upload, listing, rename, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/folder/files/{folder_id}", post(handlers::file::upload_files))
        .route("/folder/{folder_id}/files", get(handlers::file::list_files))
        .route(
            "/folder/{folder_id}/file/{file_id}",
            put(handlers::file::rename_file),
        )
        .route(
            "/folder/{folder_id}/file/{file_id}",
            delete(handlers::file::delete_file),
        )
}

/// Health check endpoints (no principal required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
