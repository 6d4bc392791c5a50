//! Batch scheduler.
//!
//! Invoked once per newly ready operation. Marks it pending, looks at the
//! pending pool for its operation type, and dispatches full batches as jobs.
//! Everything between the pending-pool read and the last dispatch runs under
//! the operation type's lock.

use super::kit_resolver::{KitResolver, OwnAssociationResolver};
use super::locks::OperationTypeLocks;
use super::SchedulingOutcome;
use crate::config::OlaConfig;
use crate::constants::messages;
use crate::error::{AnnotationKind, OlaError, OlaResult};
use crate::models::{KitId, Operation, OperationStatus, UserRef};
use crate::store::{JobDispatcher, OperationStore};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct BatchScheduler {
    config: Arc<OlaConfig>,
    store: Arc<dyn OperationStore>,
    dispatcher: Arc<dyn JobDispatcher>,
    resolver: Arc<dyn KitResolver>,
    locks: OperationTypeLocks,
    user: UserRef,
}

impl std::fmt::Debug for BatchScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScheduler")
            .field("batch_size", &self.config.batch_size)
            .field("resolver", &self.resolver.name())
            .field("user", &self.user.login)
            .finish()
    }
}

impl BatchScheduler {
    /// Scheduler resolving kits from each operation's own association
    pub fn new(
        config: Arc<OlaConfig>,
        store: Arc<dyn OperationStore>,
        dispatcher: Arc<dyn JobDispatcher>,
    ) -> Self {
        Self::with_resolver(config, store, dispatcher, Arc::new(OwnAssociationResolver))
    }

    pub fn with_resolver(
        config: Arc<OlaConfig>,
        store: Arc<dyn OperationStore>,
        dispatcher: Arc<dyn JobDispatcher>,
        resolver: Arc<dyn KitResolver>,
    ) -> Self {
        let user = UserRef::new(config.scheduler_user.clone());
        Self {
            config,
            store,
            dispatcher,
            resolver,
            locks: OperationTypeLocks::new(),
            user,
        }
    }

    /// Mark `new_op` pending and dispatch every full slice of the type's pending pool.
    ///
    /// Slicing is positional: any two operations of the same type can share a
    /// job. A short trailing slice stays pending for later calls.
    pub async fn schedule_ops_of_type_if_enough(
        &self,
        new_op: Operation,
        batch_size: u32,
    ) -> OlaResult<SchedulingOutcome> {
        if batch_size < 1 {
            return Err(OlaError::InvalidArgument(
                "batch size must be at least 1".to_string(),
            ));
        }
        let batch_len = batch_size as usize;
        let operation_type_id = new_op.operation_type_id;

        let _guard = self.locks.acquire(operation_type_id).await;

        let (new_op, previous_status) = self.mark_pending(new_op).await?;
        let pending = self.store.find_pending(operation_type_id).await?;
        let new_op_id = new_op.id;
        let operations = merge_new_operation(pending, new_op.clone());

        let mut jobs = Vec::new();
        let mut dispatched = 0;
        let mut new_op_dispatched = false;
        for batch in operations.chunks(batch_len) {
            if batch.len() < batch_len {
                continue;
            }
            let contains_new_op = batch.iter().any(|op| op.id == new_op_id);
            match self.dispatcher.schedule(batch, &self.user).await {
                Ok(job_id) => {
                    jobs.push(job_id);
                    dispatched += batch.len();
                    new_op_dispatched |= contains_new_op;
                }
                Err(error) => {
                    if !new_op_dispatched {
                        self.restore_status(new_op, previous_status).await?;
                    }
                    return Err(error);
                }
            }
        }

        let left_pending = operations.len() - dispatched;
        if jobs.is_empty() {
            crate::log_scheduler!(debug, "BATCH_WAITING",
                operation_type: operation_type_id,
                ready: operations.len(),
                required: batch_len
            );
            return Ok(SchedulingOutcome::Waiting {
                ready: operations.len(),
                required: batch_len,
            });
        }

        crate::log_scheduler!(info, "BATCHES_DISPATCHED",
            operation_type: operation_type_id,
            jobs: jobs.len(),
            left_pending: left_pending
        );
        Ok(SchedulingOutcome::Dispatched { jobs, left_pending })
    }

    /// Mark `this_op` pending and dispatch its kit's operations once exactly a full batch is ready.
    ///
    /// An operation without a kit is annotated `no_kit` and left untouched
    /// otherwise. More pending operations on the kit than the batch size
    /// annotates every one of them with `batch_too_big` and dispatches nothing.
    pub async fn schedule_same_kit_ops(&self, this_op: Operation) -> OlaResult<SchedulingOutcome> {
        let Some(kit) = self.resolver.resolve(&this_op) else {
            return self.reject_without_kit(this_op).await;
        };
        let operation_type_id = this_op.operation_type_id;
        let batch_len = self.config.batch_len();

        let _guard = self.locks.acquire(operation_type_id).await;

        let (this_op, previous_status) = self.mark_pending(this_op).await?;
        let pending = self.store.find_pending(operation_type_id).await?;
        let kit_ops: Vec<Operation> = merge_new_operation(pending, this_op.clone())
            .into_iter()
            .filter(|op| self.shares_kit(op, &kit))
            .collect();

        debug!(
            kit = %kit,
            resolver = self.resolver.name(),
            ready = kit_ops.len(),
            required = batch_len,
            "Collected pending operations for kit"
        );

        if kit_ops.len() == batch_len {
            let job_id = match self.dispatcher.schedule(&kit_ops, &self.user).await {
                Ok(job_id) => job_id,
                Err(error) => {
                    self.restore_status(this_op, previous_status).await?;
                    return Err(error);
                }
            };
            info!(kit = %kit, job_id = %job_id, "Dispatched kit batch");
            return Ok(SchedulingOutcome::Dispatched {
                jobs: vec![job_id],
                left_pending: 0,
            });
        }

        if kit_ops.len() > batch_len {
            return self.reject_oversized_kit(&kit, kit_ops).await;
        }

        Ok(SchedulingOutcome::Waiting {
            ready: kit_ops.len(),
            required: batch_len,
        })
    }

    fn shares_kit(&self, op: &Operation, kit: &KitId) -> bool {
        self.resolver
            .resolve(op)
            .is_some_and(|other| other.same_kit(kit))
    }

    async fn mark_pending(
        &self,
        mut op: Operation,
    ) -> OlaResult<(Operation, OperationStatus)> {
        let previous_status = op.status;
        op.set_status(OperationStatus::Pending);
        self.store.save(&op).await?;
        Ok((op, previous_status))
    }

    async fn restore_status(&self, mut op: Operation, status: OperationStatus) -> OlaResult<()> {
        warn!(
            operation_id = %op.id,
            status = %status,
            "Dispatch failed, restoring operation status"
        );
        op.set_status(status);
        self.store.save(&op).await
    }

    async fn reject_without_kit(&self, mut op: Operation) -> OlaResult<SchedulingOutcome> {
        warn!(operation_id = %op.id, resolver = self.resolver.name(), "Operation has no kit");
        op.record_error(AnnotationKind::NoKit, messages::NO_KIT);
        self.store.save(&op).await?;
        self.annotate_plans(std::slice::from_ref(&op), AnnotationKind::NoKit, messages::NO_KIT)
            .await?;

        Ok(SchedulingOutcome::Rejected {
            kind: AnnotationKind::NoKit,
            operations: vec![op.id],
        })
    }

    async fn reject_oversized_kit(
        &self,
        kit: &KitId,
        mut kit_ops: Vec<Operation>,
    ) -> OlaResult<SchedulingOutcome> {
        let message = messages::batch_too_big(kit.as_str(), self.config.batch_size, kit_ops.len());
        warn!(
            kit = %kit,
            count = kit_ops.len(),
            batch_size = self.config.batch_size,
            "Kit batch exceeds batch size"
        );

        for op in kit_ops.iter_mut() {
            op.record_error(AnnotationKind::BatchTooBig, message.clone());
            self.store.save(op).await?;
        }
        self.annotate_plans(&kit_ops, AnnotationKind::BatchTooBig, &message)
            .await?;

        Ok(SchedulingOutcome::Rejected {
            kind: AnnotationKind::BatchTooBig,
            operations: kit_ops.iter().map(|op| op.id).collect(),
        })
    }

    async fn annotate_plans(
        &self,
        ops: &[Operation],
        kind: AnnotationKind,
        message: &str,
    ) -> OlaResult<()> {
        if !self.config.propagate_errors_to_plan {
            return Ok(());
        }
        let plans: BTreeSet<_> = ops.iter().filter_map(|op| op.plan_id).collect();
        for plan_id in plans {
            self.store.record_plan_error(plan_id, kind, message).await?;
        }
        Ok(())
    }
}

/// Append `new_op` to the pending snapshot, replacing a stale copy in place
fn merge_new_operation(mut pending: Vec<Operation>, new_op: Operation) -> Vec<Operation> {
    let mut seen = BTreeSet::new();
    pending.retain(|op| seen.insert(op.id));

    match pending.iter_mut().find(|op| op.id == new_op.id) {
        Some(stale) => *stale = new_op,
        None => pending.push(new_op),
    }
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OperationId, OperationTypeId};

    fn batch_ids(ops: &[Operation]) -> Vec<OperationId> {
        ops.iter().map(|op| op.id).collect()
    }

    fn pending(id: i64) -> Operation {
        Operation::new(OperationId(id), OperationTypeId(1)).with_status(OperationStatus::Pending)
    }

    #[test]
    fn merge_appends_new_operation() {
        let merged = merge_new_operation(vec![pending(1), pending(2)], pending(3));
        assert_eq!(batch_ids(&merged), vec![OperationId(1), OperationId(2), OperationId(3)]);
    }

    #[test]
    fn merge_replaces_stale_copy_in_place() {
        let fresh = pending(1).with_kit("009");
        let merged = merge_new_operation(vec![pending(1), pending(2)], fresh);
        assert_eq!(batch_ids(&merged), vec![OperationId(1), OperationId(2)]);
        assert_eq!(merged[0].kit, Some(KitId::from("009")));
    }

    #[test]
    fn merge_drops_duplicate_snapshots() {
        let merged = merge_new_operation(vec![pending(1), pending(1)], pending(2));
        assert_eq!(batch_ids(&merged), vec![OperationId(1), OperationId(2)]);
    }
}
