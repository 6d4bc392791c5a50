//! Strongly typed identifiers for host-owned records.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Host id of a single operation
    OperationId
);
record_id!(
    /// Host id of an operation type; batching never crosses types
    OperationTypeId
);
record_id!(
    /// Host id of the plan enclosing an operation
    PlanId
);

/// Id of a dispatched job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User that scheduled jobs are attributed to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    pub login: String,
}

impl UserRef {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

/// Raw kit association value: a bare kit id ("003") or one with a prefix ("LOT7-003")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KitId(String);

impl KitId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into the non-digit prefix and the trailing ASCII digit run
    fn split_number(&self) -> (&str, &str) {
        let digits = self.0.bytes().rev().take_while(u8::is_ascii_digit).count();
        self.0.split_at(self.0.len() - digits)
    }

    /// Same kit when the prefixes match and the trailing numbers are equal
    /// ("007" and "7"); ids without a trailing number must match exactly
    pub fn same_kit(&self, other: &KitId) -> bool {
        let (prefix, digits) = self.split_number();
        let (other_prefix, other_digits) = other.split_number();
        if prefix != other_prefix || digits.is_empty() != other_digits.is_empty() {
            return false;
        }
        digits.trim_start_matches('0') == other_digits.trim_start_matches('0')
    }
}

impl fmt::Display for KitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KitId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for KitId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_zeros_do_not_change_the_kit() {
        assert!(KitId::from("007").same_kit(&KitId::from("7")));
        assert!(KitId::from("LOT7-003").same_kit(&KitId::from("LOT7-03")));
        assert!(!KitId::from("003").same_kit(&KitId::from("004")));
    }

    #[test]
    fn the_full_digit_run_is_compared() {
        assert!(!KitId::from("1001").same_kit(&KitId::from("001")));
        assert!(!KitId::from("001").same_kit(&KitId::from("1001")));
    }

    #[test]
    fn different_prefixes_are_different_kits() {
        assert!(!KitId::from("LOTA-001").same_kit(&KitId::from("LOTB-001")));
        assert!(!KitId::from("LOT4-007").same_kit(&KitId::from("007")));
    }

    #[test]
    fn ids_without_a_number_fall_back_to_exact_match() {
        assert!(KitId::from("ab").same_kit(&KitId::from("ab")));
        assert!(!KitId::from("ab").same_kit(&KitId::from("abc")));
        assert!(!KitId::from("ab").same_kit(&KitId::from("ab0")));
    }

    #[test]
    fn job_ids_are_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }
}
