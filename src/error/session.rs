//! Session errors

use super::SyncError;

/// Creates an authentication failed error
pub fn auth_failed(user: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::AuthFailed {
        user: user.into(),
        reason: reason.into(),
    }
}

/// Creates a logout failed error
pub fn logout_failed(reason: impl Into<String>) -> SyncError {
    SyncError::LogoutFailed {
        reason: reason.into(),
    }
}

/// Creates an add rejected error (server answered with something other than 1)
pub fn add_rejected(channel: impl Into<String>) -> SyncError {
    SyncError::AddRejected {
        channel: channel.into(),
    }
}
