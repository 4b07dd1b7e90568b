use async_trait::async_trait;
use dashmap::DashMap;
use parlor_models::user::UserSnapshot;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("user {0} not found")]
    NotFound(i64),
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Authoritative store of user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_immutable_user(&self, id: i64) -> Result<UserSnapshot, DirectoryError>;

    async fn update_first_and_last_name(
        &self,
        user_id: i64,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), DirectoryError>;

    async fn update_about(&self, user_id: i64, about: &str) -> Result<(), DirectoryError>;
}

/// In-memory directory keyed by user id.
#[derive(Default)]
pub struct MemoryDirectory {
    users: DashMap<i64, UserSnapshot>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the directory from a pre-fetched list of users.
    pub fn from_users(users: impl IntoIterator<Item = UserSnapshot>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.insert(user);
        }
        tracing::info!(users = directory.users.len(), "user directory loaded");
        directory
    }

    pub fn insert(&self, user: UserSnapshot) {
        self.users.insert(user.id, user);
    }

    pub fn get(&self, id: i64) -> Option<UserSnapshot> {
        self.users.get(&id).map(|user| user.clone())
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn get_immutable_user(&self, id: i64) -> Result<UserSnapshot, DirectoryError> {
        self.get(id).ok_or(DirectoryError::NotFound(id))
    }

    async fn update_first_and_last_name(
        &self,
        user_id: i64,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), DirectoryError> {
        let mut user = self
            .users
            .get_mut(&user_id)
            .ok_or(DirectoryError::NotFound(user_id))?;
        user.first_name = first_name.to_string();
        user.last_name = last_name.to_string();
        Ok(())
    }

    async fn update_about(&self, user_id: i64, about: &str) -> Result<(), DirectoryError> {
        let mut user = self
            .users
            .get_mut(&user_id)
            .ok_or(DirectoryError::NotFound(user_id))?;
        user.about = (!about.is_empty()).then(|| about.to_string());
        Ok(())
    }
}
