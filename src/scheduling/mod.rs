//! # Batch Scheduling
//!
//! Groups pending operations of one type into jobs of exactly `batch_size`
//! operations, either positionally or per kit.

pub mod kit_resolver;
pub mod locks;
pub mod scheduler;

use crate::error::AnnotationKind;
use crate::models::{JobId, OperationId};
use serde::{Deserialize, Serialize};

pub use kit_resolver::{FirstInputResolver, KitResolver, OwnAssociationResolver};
pub use locks::OperationTypeLocks;
pub use scheduler::BatchScheduler;

/// Result of one scheduling attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SchedulingOutcome {
    /// One job per full batch; `left_pending` operations are still waiting
    Dispatched { jobs: Vec<JobId>, left_pending: usize },
    /// Not enough operations yet
    Waiting { ready: usize, required: usize },
    /// Annotated instead of scheduled
    Rejected {
        kind: AnnotationKind,
        operations: Vec<OperationId>,
    },
}

impl SchedulingOutcome {
    pub fn job_count(&self) -> usize {
        match self {
            Self::Dispatched { jobs, .. } => jobs.len(),
            _ => 0,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
