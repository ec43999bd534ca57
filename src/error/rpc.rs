//! XML-RPC errors

use super::SyncError;

/// Creates a transport error (connection, TLS, HTTP status)
pub fn transport(method: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::RpcTransport {
        method: method.into(),
        reason: reason.into(),
    }
}

/// Creates a fault error from a `<fault>` response
pub fn fault(method: impl Into<String>, code: i64, message: impl Into<String>) -> SyncError {
    SyncError::RpcFault {
        method: method.into(),
        code,
        message: message.into(),
    }
}

/// Creates a malformed response error
pub fn malformed(method: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::RpcMalformed {
        method: method.into(),
        reason: reason.into(),
    }
}
