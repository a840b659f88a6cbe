//! # docvault-api
//!
//! The HTTP surface of DocVault: axum router, handlers, DTOs, the
//! principal extractor, and the error-to-status mapping. All domain
//! behavior lives in `docvault-service`; this crate only translates
//! between HTTP and the hierarchy manager.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
