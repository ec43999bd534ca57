//! Configuration handling for smlm-sync
//!
//! This module contains:
//! - [`server`]: connection settings for the SUSE Manager API
//! - [`declaration`]: the YAML list of packages and their target channels

pub mod declaration;
pub mod server;

// Re-export commonly used types
pub use declaration::{PackageDeclaration, load_declarations};
pub use server::ServerConfig;
