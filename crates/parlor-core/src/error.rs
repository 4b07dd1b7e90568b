use thiserror::Error;

use crate::directory::DirectoryError;
use crate::sync::SyncError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("user lookup failed")]
    UserLookupFailed(#[source] DirectoryError),
    #[error("invalid first name")]
    InvalidFirstName,
    #[error("about is too long (max {max}, got {got})")]
    AboutTooLong { max: usize, got: usize },
    #[error("downstream write failed")]
    DownstreamWriteFailed(#[source] DirectoryError),
    #[error("notification failed")]
    NotificationFailed(#[source] SyncError),
}

/// Error as reported to the client over the RPC layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcError {
    pub code: i32,
    pub message: &'static str,
}

impl RpcError {
    pub const fn new(code: i32, message: &'static str) -> Self {
        Self { code, message }
    }
}

impl CoreError {
    pub fn rpc_error(&self) -> RpcError {
        match self {
            CoreError::UserLookupFailed(DirectoryError::NotFound(_)) => {
                RpcError::new(400, "USER_ID_INVALID")
            }
            CoreError::InvalidFirstName => RpcError::new(400, "FIRSTNAME_INVALID"),
            CoreError::AboutTooLong { .. } => RpcError::new(400, "ABOUT_TOO_LONG"),
            CoreError::UserLookupFailed(_)
            | CoreError::DownstreamWriteFailed(_)
            | CoreError::NotificationFailed(_) => RpcError::new(500, "INTERNAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(CoreError::InvalidFirstName.rpc_error().message, "FIRSTNAME_INVALID");
        let err = CoreError::AboutTooLong { max: 70, got: 71 };
        assert_eq!(err.rpc_error(), RpcError::new(400, "ABOUT_TOO_LONG"));
        assert_eq!(err.to_string(), "about is too long (max 70, got 71)");
    }

    #[test]
    fn downstream_failures_are_internal() {
        let err = CoreError::DownstreamWriteFailed(DirectoryError::Unavailable("down".into()));
        assert_eq!(err.rpc_error().code, 500);
        let missing = CoreError::UserLookupFailed(DirectoryError::NotFound(9));
        assert_eq!(missing.rpc_error().message, "USER_ID_INVALID");
    }

    #[test]
    fn wrapped_errors_are_reported_once() {
        let err = CoreError::NotificationFailed(SyncError::Unavailable("bus closed".into()));
        assert_eq!(err.to_string(), "notification failed");
        assert_eq!(
            err.source().map(|e| e.to_string()).as_deref(),
            Some("update distribution unavailable: bus closed")
        );

        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches("bus closed").count(), 1);
        assert_eq!(chain, "notification failed: update distribution unavailable: bus closed");
    }
}
