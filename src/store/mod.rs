//! # Host Collaborators
//!
//! The operation pool and the job system belong to the host platform. The
//! scheduler reaches them only through these traits, so hosts plug in their
//! own persistence and tests use the in-memory versions.

pub mod memory;

use crate::error::{AnnotationKind, OlaResult};
use crate::models::{JobId, Operation, OperationTypeId, PlanId, UserRef};
use async_trait::async_trait;

pub use memory::{DispatchedJob, InMemoryJobDispatcher, InMemoryOperationStore};

/// Access to the host's operation pool
#[async_trait]
pub trait OperationStore: Send + Sync {
    /// Pending operations of one type, in the host's natural order
    async fn find_pending(&self, operation_type_id: OperationTypeId) -> OlaResult<Vec<Operation>>;

    /// Persist status and annotation changes on an operation snapshot
    async fn save(&self, operation: &Operation) -> OlaResult<()>;

    /// Attach an annotation to a plan
    async fn record_plan_error(
        &self,
        plan_id: PlanId,
        kind: AnnotationKind,
        message: &str,
    ) -> OlaResult<()>;
}

/// The host's job system.
///
/// Each call creates a new job; callers must not submit the same operation set twice.
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    async fn schedule(&self, operations: &[Operation], user: &UserRef) -> OlaResult<JobId>;
}
