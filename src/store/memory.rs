//! In-memory operation store and job dispatcher.

use super::{JobDispatcher, OperationStore};
use crate::error::{AnnotationKind, OlaError, OlaResult};
use crate::models::{
    Annotation, JobId, Operation, OperationId, OperationStatus, OperationTypeId, PlanId, UserRef,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Operation pool keyed by id; pending queries return ascending id order
#[derive(Debug, Default)]
pub struct InMemoryOperationStore {
    operations: RwLock<BTreeMap<OperationId, Operation>>,
    plan_annotations: RwLock<HashMap<PlanId, Vec<Annotation>>>,
}

impl InMemoryOperationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an operation
    pub fn insert(&self, operation: Operation) {
        self.operations.write().insert(operation.id, operation);
    }

    pub fn get(&self, id: OperationId) -> Option<Operation> {
        self.operations.read().get(&id).cloned()
    }

    pub fn count_with_status(
        &self,
        operation_type_id: OperationTypeId,
        status: OperationStatus,
    ) -> usize {
        self.operations
            .read()
            .values()
            .filter(|op| op.operation_type_id == operation_type_id && op.status == status)
            .count()
    }

    pub fn plan_annotations(&self, plan_id: PlanId) -> Vec<Annotation> {
        self.plan_annotations
            .read()
            .get(&plan_id)
            .cloned()
            .unwrap_or_default()
    }

    fn set_status(&self, ids: &[OperationId], status: OperationStatus) {
        let mut operations = self.operations.write();
        for id in ids {
            if let Some(op) = operations.get_mut(id) {
                op.status = status;
            }
        }
    }
}

#[async_trait]
impl OperationStore for InMemoryOperationStore {
    async fn find_pending(&self, operation_type_id: OperationTypeId) -> OlaResult<Vec<Operation>> {
        Ok(self
            .operations
            .read()
            .values()
            .filter(|op| {
                op.operation_type_id == operation_type_id && op.status == OperationStatus::Pending
            })
            .cloned()
            .collect())
    }

    async fn save(&self, operation: &Operation) -> OlaResult<()> {
        self.insert(operation.clone());
        Ok(())
    }

    async fn record_plan_error(
        &self,
        plan_id: PlanId,
        kind: AnnotationKind,
        message: &str,
    ) -> OlaResult<()> {
        self.plan_annotations
            .write()
            .entry(plan_id)
            .or_default()
            .push(Annotation::new(kind, message));
        Ok(())
    }
}

/// Job recorded by [`InMemoryJobDispatcher`]
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedJob {
    pub job_id: JobId,
    pub operation_ids: Vec<OperationId>,
    pub user: UserRef,
}

/// Records jobs and moves their operations to `scheduled` in the backing store
#[derive(Debug)]
pub struct InMemoryJobDispatcher {
    store: Arc<InMemoryOperationStore>,
    jobs: RwLock<Vec<DispatchedJob>>,
    fail_next: AtomicBool,
}

impl InMemoryJobDispatcher {
    pub fn new(store: Arc<InMemoryOperationStore>) -> Self {
        Self {
            store,
            jobs: RwLock::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn jobs(&self) -> Vec<DispatchedJob> {
        self.jobs.read().clone()
    }

    /// Make the next `schedule` call fail without creating a job
    pub fn fail_next_dispatch(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl JobDispatcher for InMemoryJobDispatcher {
    async fn schedule(&self, operations: &[Operation], user: &UserRef) -> OlaResult<JobId> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(OlaError::DispatchError(
                "job system rejected the batch".to_string(),
            ));
        }

        let job_id = JobId::new();
        let operation_ids: Vec<OperationId> = operations.iter().map(|op| op.id).collect();
        self.store
            .set_status(&operation_ids, OperationStatus::Scheduled);
        self.jobs.write().push(DispatchedJob {
            job_id,
            operation_ids,
            user: user.clone(),
        });
        Ok(job_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_pending_filters_by_type_and_status() {
        let store = InMemoryOperationStore::new();
        store.insert(
            Operation::new(OperationId(1), OperationTypeId(1)).with_status(OperationStatus::Pending),
        );
        store.insert(
            Operation::new(OperationId(2), OperationTypeId(2)).with_status(OperationStatus::Pending),
        );
        store.insert(Operation::new(OperationId(3), OperationTypeId(1)));

        let pending = store.find_pending(OperationTypeId(1)).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, OperationId(1));
    }

    #[tokio::test]
    async fn dispatch_marks_operations_scheduled() {
        let store = Arc::new(InMemoryOperationStore::new());
        let op = Operation::new(OperationId(1), OperationTypeId(1)).with_status(OperationStatus::Pending);
        store.insert(op.clone());
        let dispatcher = InMemoryJobDispatcher::new(Arc::clone(&store));

        let job_id = dispatcher
            .schedule(&[op], &UserRef::new("neptune"))
            .await
            .unwrap();

        assert_eq!(dispatcher.jobs()[0].job_id, job_id);
        assert_eq!(
            store.get(OperationId(1)).unwrap().status,
            OperationStatus::Scheduled
        );
    }

    #[tokio::test]
    async fn injected_failure_applies_once() {
        let store = Arc::new(InMemoryOperationStore::new());
        let dispatcher = InMemoryJobDispatcher::new(Arc::clone(&store));
        dispatcher.fail_next_dispatch();

        let user = UserRef::new("neptune");
        assert!(dispatcher.schedule(&[], &user).await.is_err());
        assert!(dispatcher.schedule(&[], &user).await.is_ok());
        assert_eq!(dispatcher.jobs().len(), 1);
    }
}
