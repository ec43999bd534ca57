//! Command implementations for smlm-sync CLI

pub mod add_packages;
pub mod completions;
pub mod list_packages;
pub mod version;
