pub mod account;
pub mod directory;
pub mod error;
pub mod events;
pub mod locks;
pub mod session;
pub mod sync;

use std::sync::Arc;

use directory::UserDirectory;
use locks::AccountLocks;
use parlor_util::validation::ABOUT_MAX_LENGTH;
use sync::SyncService;

/// Field limits applied by the account handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Maximum biography length in characters.
    pub about_max_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            about_max_length: ABOUT_MAX_LENGTH,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Authoritative user records.
    pub users: Arc<dyn UserDirectory>,
    /// Fan-out of updates to an account's other sessions.
    pub sync: Arc<dyn SyncService>,
    pub config: AppConfig,
    /// Serializes profile mutations per account.
    pub account_locks: Arc<AccountLocks>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserDirectory>, sync: Arc<dyn SyncService>, config: AppConfig) -> Self {
        Self {
            users,
            sync,
            config,
            account_locks: Arc::new(AccountLocks::new()),
        }
    }
}
