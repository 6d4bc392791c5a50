//! Error types for the OLASimple core.
//!

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OlaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Store error: {0}")]
    StoreError(String),
    #[error("Dispatch error: {0}")]
    DispatchError(String),
    #[error("Validation exhausted: {kind} after {attempts} attempts")]
    ValidationExhausted {
        kind: AnnotationKind,
        attempts: u32,
    },
    #[error("Batch size mismatch: expected {expected} operations, got {actual}")]
    BatchSizeMismatch { expected: usize, actual: usize },
}

impl From<config::ConfigError> for OlaError {
    fn from(error: config::ConfigError) -> Self {
        OlaError::ConfigurationError(error.to_string())
    }
}

impl From<serde_json::Error> for OlaError {
    fn from(error: serde_json::Error) -> Self {
        OlaError::InvalidArgument(format!("JSON serialization error: {error}"))
    }
}

pub type OlaResult<T> = std::result::Result<T, OlaError>;

/// Kinds of annotation attached to operations (and plans) instead of failing the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// Operation has no resolvable kit association
    NoKit,
    /// More pending operations share a kit than the batch size allows
    BatchTooBig,
    /// Scanned sample ids never matched the expected ids
    SampleProblem,
    /// Scanned package id never matched the expected package
    PackageProblem,
}

impl AnnotationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoKit => "no_kit",
            Self::BatchTooBig => "batch_too_big",
            Self::SampleProblem => "sample_problem",
            Self::PackageProblem => "package_problem",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnnotationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_kit" => Ok(Self::NoKit),
            "batch_too_big" => Ok(Self::BatchTooBig),
            "sample_problem" => Ok(Self::SampleProblem),
            "package_problem" => Ok(Self::PackageProblem),
            _ => Err(format!("Invalid annotation kind: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_kind_round_trips_through_str() {
        for kind in [
            AnnotationKind::NoKit,
            AnnotationKind::BatchTooBig,
            AnnotationKind::SampleProblem,
            AnnotationKind::PackageProblem,
        ] {
            assert_eq!(kind.as_str().parse::<AnnotationKind>(), Ok(kind));
        }
        assert!("exploded".parse::<AnnotationKind>().is_err());
    }

    #[test]
    fn annotation_kind_serializes_snake_case() {
        let json = serde_json::to_string(&AnnotationKind::BatchTooBig).unwrap();
        assert_eq!(json, "\"batch_too_big\"");
    }

    #[test]
    fn validation_exhausted_message_names_kind() {
        let err = OlaError::ValidationExhausted {
            kind: AnnotationKind::SampleProblem,
            attempts: 5,
        };
        assert_eq!(
            err.to_string(),
            "Validation exhausted: sample_problem after 5 attempts"
        );
    }
}
