//! # docvault-entity
//!
//! Domain entity models for DocVault: the folder tree with its embedded
//! child folders and file references.

pub mod folder;

pub use folder::{ChildFolder, FileRef, Folder};
