//! Folder domain entities.

pub mod model;

pub use model::{ChildFolder, FileRef, Folder};
