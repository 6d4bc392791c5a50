//! Shared harness for scheduler integration tests.
#![allow(dead_code)]

use olasimple_core::models::{Operation, OperationId, OperationStatus, OperationTypeId};
use olasimple_core::store::{InMemoryJobDispatcher, InMemoryOperationStore};
use olasimple_core::{BatchScheduler, OlaConfig};
use std::sync::Arc;

pub const TYPE_T: OperationTypeId = OperationTypeId(100);
pub const OTHER_TYPE: OperationTypeId = OperationTypeId(200);

pub struct Harness {
    pub config: Arc<OlaConfig>,
    pub store: Arc<InMemoryOperationStore>,
    pub dispatcher: Arc<InMemoryJobDispatcher>,
    pub scheduler: BatchScheduler,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(OlaConfig::default())
    }

    pub fn with_config(config: OlaConfig) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(InMemoryOperationStore::new());
        let dispatcher = Arc::new(InMemoryJobDispatcher::new(Arc::clone(&store)));
        let scheduler = BatchScheduler::new(
            Arc::clone(&config),
            store.clone(),
            dispatcher.clone(),
        );
        Self {
            config,
            store,
            dispatcher,
            scheduler,
        }
    }

    /// Seed an operation already sitting in the pending pool
    pub fn seed_pending(&self, op: Operation) -> Operation {
        let op = op.with_status(OperationStatus::Pending);
        self.store.insert(op.clone());
        op
    }

    pub fn stored(&self, id: i64) -> Operation {
        self.store
            .get(OperationId(id))
            .expect("operation should be in the store")
    }
}

pub fn op(id: i64) -> Operation {
    Operation::new(OperationId(id), TYPE_T)
}

pub fn kit_op(id: i64, kit: &str) -> Operation {
    op(id).with_kit(kit)
}
