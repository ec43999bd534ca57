//! Configuration errors

use super::SyncError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> SyncError {
    SyncError::ConfigNotFound { path: path.into() }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> SyncError {
    SyncError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid declaration error
pub fn declaration_invalid(name: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::DeclarationInvalid {
        name: name.into(),
        reason: reason.into(),
    }
}
