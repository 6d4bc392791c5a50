//! Kit resolution policies.
//!
//! Hosts disagree on where an operation's kit lives: some attach it to the
//! operation, others only to the operation's first input item. The host adapter
//! picks the policy; the scheduler never guesses.

use crate::models::{KitId, Operation};
use std::fmt::Debug;

/// Decides which kit an operation belongs to
pub trait KitResolver: Send + Sync + Debug {
    fn resolve(&self, operation: &Operation) -> Option<KitId>;

    /// Policy name for logging
    fn name(&self) -> &'static str;
}

/// Kit association on the operation itself
#[derive(Debug, Default, Clone, Copy)]
pub struct OwnAssociationResolver;

impl KitResolver for OwnAssociationResolver {
    fn resolve(&self, operation: &Operation) -> Option<KitId> {
        operation.kit_association().cloned()
    }

    fn name(&self) -> &'static str {
        "own_association"
    }
}

/// Kit association on the operation's first input item
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstInputResolver;

impl KitResolver for FirstInputResolver {
    fn resolve(&self, operation: &Operation) -> Option<KitId> {
        operation.input_kit.clone()
    }

    fn name(&self) -> &'static str {
        "first_input"
    }
}
