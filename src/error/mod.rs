//! Error types and handling for smlm-sync
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Server configuration and declaration file errors
//! - [`rpc`]: XML-RPC transport and protocol errors
//! - [`session`]: Authentication and session lifecycle errors

pub mod config;
pub mod rpc;
pub mod session;

#[allow(unused_imports)]
pub use config::{
    declaration_invalid, invalid as config_invalid, not_found as config_not_found,
    parse_failed as config_parse_failed, read_failed as config_read_failed,
};
#[allow(unused_imports)]
pub use rpc::{fault as rpc_fault, malformed as rpc_malformed, transport as rpc_transport};
#[allow(unused_imports)]
pub use session::{add_rejected, auth_failed, logout_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for smlm-sync operations
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    // Configuration errors
    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(smlm::config::invalid),
        help(
            "Set SUSE_MANAGER_HOSTNAME, SUSE_MANAGER_USER and SUSE_MANAGER_PASSWORD or pass --host, --user and --password"
        )
    )]
    ConfigInvalid { message: String },

    #[error("Invalid declaration for package '{name}': {reason}")]
    #[diagnostic(code(smlm::config::declaration_invalid))]
    DeclarationInvalid { name: String, reason: String },

    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(smlm::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(smlm::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(smlm::config::parse_failed),
        help(
            "The file must be a YAML list of entries with name, version, release, source_channel and target_channels"
        )
    )]
    ConfigParseFailed { path: String, reason: String },

    // RPC errors
    #[error("Remote call {method} failed: {reason}")]
    #[diagnostic(
        code(smlm::rpc::transport),
        help("Check that the server is reachable and the host, port and scheme are correct")
    )]
    RpcTransport { method: String, reason: String },

    #[error("Remote call {method} returned fault {code}: {message}")]
    #[diagnostic(code(smlm::rpc::fault))]
    RpcFault {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Malformed response to {method}: {reason}")]
    #[diagnostic(code(smlm::rpc::malformed))]
    RpcMalformed { method: String, reason: String },

    // Session errors
    #[error("Failed to log in to SUSE Manager as '{user}': {reason}")]
    #[diagnostic(
        code(smlm::session::auth_failed),
        help("Check SUSE_MANAGER_USER and SUSE_MANAGER_PASSWORD")
    )]
    AuthFailed { user: String, reason: String },

    #[error("Failed to log out from SUSE Manager: {reason}")]
    #[diagnostic(code(smlm::session::logout_failed))]
    LogoutFailed { reason: String },

    #[error("Server rejected adding packages to channel {channel}")]
    #[diagnostic(code(smlm::session::add_rejected))]
    AddRejected { channel: String },

    // Run errors
    #[error("Reconciliation finished with {failed} failure(s)")]
    #[diagnostic(
        code(smlm::reconcile::incomplete),
        help("Review the outcome lines above; rerunning is safe, present packages are skipped")
    )]
    ReconcileIncomplete { failed: usize },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(smlm::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(smlm::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::IoError {
            message: format!("Failed to render JSON: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SyncError>;
