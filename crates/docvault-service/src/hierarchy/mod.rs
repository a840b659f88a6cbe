//! The hierarchy manager and its batch-upload flow.

pub mod manager;
pub mod upload;

pub use manager::HierarchyManager;
pub use upload::{BatchUploadOutcome, FailedUpload, UploadItem};
