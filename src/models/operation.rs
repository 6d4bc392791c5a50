use super::identifiers::{KitId, OperationId, OperationTypeId, PlanId};
use super::status::OperationStatus;
use crate::error::AnnotationKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Error annotation attached to an operation or plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

impl Annotation {
    pub fn new(kind: AnnotationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// Snapshot of a host-owned operation.
///
/// The core reads the kit associations and status, stages values in
/// `temporary`, and hands the snapshot back to the store with `save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: OperationId,
    pub operation_type_id: OperationTypeId,
    pub status: OperationStatus,
    pub plan_id: Option<PlanId>,
    /// Kit association on the operation itself
    pub kit: Option<KitId>,
    /// Kit association on the operation's first input item
    pub input_kit: Option<KitId>,
    pub annotations: Vec<Annotation>,
    /// Values staged before they are committed as associations
    pub temporary: HashMap<String, Value>,
}

impl Operation {
    pub fn new(id: OperationId, operation_type_id: OperationTypeId) -> Self {
        Self {
            id,
            operation_type_id,
            status: OperationStatus::Waiting,
            plan_id: None,
            kit: None,
            input_kit: None,
            annotations: Vec::new(),
            temporary: HashMap::new(),
        }
    }

    pub fn with_status(mut self, status: OperationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_kit(mut self, kit: impl Into<KitId>) -> Self {
        self.kit = Some(kit.into());
        self
    }

    pub fn with_input_kit(mut self, kit: impl Into<KitId>) -> Self {
        self.input_kit = Some(kit.into());
        self
    }

    pub fn with_plan(mut self, plan_id: PlanId) -> Self {
        self.plan_id = Some(plan_id);
        self
    }

    pub fn set_status(&mut self, status: OperationStatus) {
        self.status = status;
    }

    pub fn kit_association(&self) -> Option<&KitId> {
        self.kit.as_ref()
    }

    pub fn record_error(&mut self, kind: AnnotationKind, message: impl Into<String>) {
        self.annotations.push(Annotation::new(kind, message));
    }

    pub fn has_error(&self, kind: AnnotationKind) -> bool {
        self.annotations.iter().any(|a| a.kind == kind)
    }

    pub fn temporary_str(&self, key: &str) -> Option<&str> {
        self.temporary.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_operations_wait_without_annotations() {
        let op = Operation::new(OperationId(1), OperationTypeId(7));
        assert_eq!(op.status, OperationStatus::Waiting);
        assert!(op.annotations.is_empty());
        assert!(op.kit_association().is_none());
    }

    #[test]
    fn record_error_is_queryable_by_kind() {
        let mut op = Operation::new(OperationId(1), OperationTypeId(7));
        op.record_error(AnnotationKind::NoKit, "missing");
        assert!(op.has_error(AnnotationKind::NoKit));
        assert!(!op.has_error(AnnotationKind::BatchTooBig));
        assert_eq!(op.annotations[0].message, "missing");
    }
}
