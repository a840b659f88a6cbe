//! Traits implemented across DocVault crates.

pub mod remote;
