use crate::models::OperationTypeId;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per operation type.
///
/// Held across the fetch-pending, mutate, dispatch sequence so two callers
/// scheduling the same type never read the same pending set.
#[derive(Debug, Default)]
pub struct OperationTypeLocks {
    locks: DashMap<OperationTypeId, Arc<Mutex<()>>>,
}

impl OperationTypeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, operation_type_id: OperationTypeId) -> OwnedMutexGuard<()> {
        // Release the shard guard before awaiting
        let lock = Arc::clone(
            self.locks
                .entry(operation_type_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        lock.lock_owned().await
    }

    pub fn tracked_types(&self) -> usize {
        self.locks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_type_is_exclusive() {
        let locks = Arc::new(OperationTypeLocks::new());
        let guard = locks.acquire(OperationTypeId(1)).await;

        let contender = Arc::clone(&locks);
        let blocked = tokio::time::timeout(
            Duration::from_millis(50),
            contender.acquire(OperationTypeId(1)),
        )
        .await;
        assert!(blocked.is_err());

        drop(guard);
        let _again = locks.acquire(OperationTypeId(1)).await;
    }

    #[tokio::test]
    async fn different_types_do_not_contend() {
        let locks = OperationTypeLocks::new();
        let _a = locks.acquire(OperationTypeId(1)).await;
        let _b = locks.acquire(OperationTypeId(2)).await;
        assert_eq!(locks.tracked_types(), 2);
    }
}
