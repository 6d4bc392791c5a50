pub mod identifiers;
pub mod operation;
pub mod status;

// Re-export core models for easy access
pub use identifiers::{JobId, KitId, OperationId, OperationTypeId, PlanId, UserRef};
pub use operation::{Annotation, Operation};
pub use status::OperationStatus;
