use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

/// Per-repository write locks.
///
/// Re-ingesting a repository is delete-then-insert; two concurrent batches
/// for the same repository would interleave into a corpus that is neither.
/// Each repository gets its own async mutex, so ingestion for different
/// repositories still proceeds in parallel.
#[derive(Default)]
pub struct RepoLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl RepoLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the write lock for one repository, waiting if another batch
    /// holds it
    pub async fn acquire(&self, repo_name: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("repo lock table poisoned");
            locks
                .entry(repo_name.to_string())
                .or_default()
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_repo_is_exclusive() {
        let locks = RepoLocks::new();
        let guard = locks.acquire("r1").await;

        let blocked = tokio::time::timeout(Duration::from_millis(20), locks.acquire("r1")).await;
        assert!(blocked.is_err(), "second acquire should wait");

        drop(guard);
        let reacquired =
            tokio::time::timeout(Duration::from_millis(20), locks.acquire("r1")).await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn different_repos_do_not_contend() {
        let locks = RepoLocks::new();
        let _r1 = locks.acquire("r1").await;

        let r2 = tokio::time::timeout(Duration::from_millis(20), locks.acquire("r2")).await;
        assert!(r2.is_ok());
    }
}
