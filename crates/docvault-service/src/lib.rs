//! # docvault-service
//!
//! Business logic for DocVault: the ownership guard, the per-folder lock
//! registry, and the hierarchy manager that orchestrates every mutation as
//! an ordered saga across the remote blob store and the metadata index.

pub mod access;
pub mod context;
pub mod hierarchy;
pub mod locks;

pub use context::RequestContext;
pub use hierarchy::HierarchyManager;
