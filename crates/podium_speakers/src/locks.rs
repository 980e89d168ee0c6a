//! Per-record serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockTable = Mutex<HashMap<i32, Arc<AsyncMutex<()>>>>;

/// One async lock per speaker id.
///
/// Entries exist only while someone holds or waits for them.
#[derive(Debug, Clone, Default)]
pub struct RecordLocks {
    table: Arc<LockTable>,
}

/// Exclusive access to one speaker id until dropped.
#[derive(Debug)]
pub struct RecordGuard {
    id: i32,
    table: Arc<LockTable>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl RecordLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until `id` is free and take it.
    pub async fn acquire(&self, id: i32) -> RecordGuard {
        let lock = {
            let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
            table.entry(id).or_default().clone()
        };
        let guard = lock.lock_owned().await;
        RecordGuard {
            id,
            table: Arc::clone(&self.table),
            guard: Some(guard),
        }
    }

    /// Number of ids currently locked or awaited.
    pub fn len(&self) -> usize {
        self.table.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// True when no id is locked or awaited.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for RecordGuard {
    fn drop(&mut self) {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        self.guard.take();
        // Only the table's own handle left: nobody is waiting.
        if let Some(lock) = table.get(&self.id) {
            if Arc::strong_count(lock) == 1 {
                table.remove(&self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_id_waits() {
        let locks = RecordLocks::new();
        let held = locks.acquire(1).await;

        let contender = locks.clone();
        let blocked =
            tokio::time::timeout(Duration::from_millis(50), contender.acquire(1)).await;
        assert!(blocked.is_err());

        drop(held);
        let acquired =
            tokio::time::timeout(Duration::from_millis(50), locks.acquire(1)).await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn different_ids_are_independent() {
        let locks = RecordLocks::new();
        let _one = locks.acquire(1).await;
        let two = tokio::time::timeout(Duration::from_millis(50), locks.acquire(2)).await;
        assert!(two.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn entries_are_dropped_when_released() {
        let locks = RecordLocks::new();
        {
            let _guard = locks.acquire(7).await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn waiter_keeps_entry_alive() {
        let locks = RecordLocks::new();
        let held = locks.acquire(3).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(3).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(held);
        assert!(locks.len() <= 1);

        waiter.await.unwrap();
        assert!(locks.is_empty());
    }
}
