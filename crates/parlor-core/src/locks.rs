use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-account mutexes: Account -> lock.
/// Holding an account's guard makes read-compare-write sequences on that
/// account's profile run one at a time.
#[derive(Default)]
pub struct AccountLocks {
    accounts: DashMap<i64, Arc<Mutex<()>>>,
}

/// Exclusive hold on one account. Dropping it, including when the owning
/// future is cancelled, unlocks the account and prunes its entry once no one
/// else holds or waits on it.
pub struct AccountGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a AccountLocks,
    user_id: i64,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other request holds `user_id`.
    pub async fn lock(&self, user_id: i64) -> AccountGuard<'_> {
        let lock = Arc::clone(&*self.accounts.entry(user_id).or_default());
        let guard = lock.lock_owned().await;
        AccountGuard {
            guard: Some(guard),
            locks: self,
            user_id,
        }
    }

    fn release(&self, user_id: i64) {
        self.accounts
            .remove_if(&user_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Drop for AccountGuard<'_> {
    fn drop(&mut self) {
        // The mutex guard owns an Arc to the entry; let go of it first.
        drop(self.guard.take());
        self.locks.release(self.user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn dropping_guard_keeps_contended_entries() {
        let locks = Arc::new(AccountLocks::new());
        let guard = locks.lock(1).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.lock(1).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(guard);
        assert_eq!(locks.len(), 1);
        waiter.await.unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn cancelled_holder_prunes_its_entry() {
        let locks = Arc::new(AccountLocks::new());
        let holder = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.lock(1).await;
                std::future::pending::<()>().await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(locks.len(), 1);

        holder.abort();
        assert!(holder.await.unwrap_err().is_cancelled());
        assert!(locks.is_empty());

        // The account is free again.
        let _guard = tokio::time::timeout(Duration::from_millis(50), locks.lock(1))
            .await
            .expect("account should be unlocked after cancellation");
    }

    #[tokio::test]
    async fn accounts_do_not_block_each_other() {
        let locks = AccountLocks::new();
        let _a = locks.lock(1).await;
        let _b = tokio::time::timeout(Duration::from_millis(50), locks.lock(2))
            .await
            .expect("second account should not wait");
        assert_eq!(locks.len(), 2);
    }
}
