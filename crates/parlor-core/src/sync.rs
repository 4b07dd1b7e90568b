use async_trait::async_trait;
use parlor_models::update::Updates;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to encode updates")]
    Serialize(#[from] serde_json::Error),
    #[error("update distribution unavailable: {0}")]
    Unavailable(String),
}

/// Pushes updates to the sessions of an account.
#[async_trait]
pub trait SyncService: Send + Sync {
    /// Deliver `updates` to every session of `user_id` except those bound to
    /// `perm_auth_key_id`.
    async fn notify_others(
        &self,
        user_id: i64,
        perm_auth_key_id: i64,
        updates: Updates,
    ) -> Result<(), SyncError>;
}
