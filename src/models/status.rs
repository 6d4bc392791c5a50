use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation status as reported by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    /// Created but not yet eligible for batching
    Waiting,
    /// Ready and waiting to be grouped into a job
    Pending,
    /// Grouped into a dispatched job
    Scheduled,
    /// Job is being executed
    Running,
    /// Finished
    Done,
    /// Failed
    Error,
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Pending => write!(f, "pending"),
            Self::Scheduled => write!(f, "scheduled"),
            Self::Running => write!(f, "running"),
            Self::Done => write!(f, "done"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for OperationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "pending" => Ok(Self::Pending),
            "scheduled" => Ok(Self::Scheduled),
            "running" => Ok(Self::Running),
            "done" => Ok(Self::Done),
            "error" => Ok(Self::Error),
            _ => Err(format!("Invalid operation status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        for status in [
            OperationStatus::Waiting,
            OperationStatus::Pending,
            OperationStatus::Scheduled,
            OperationStatus::Running,
            OperationStatus::Done,
            OperationStatus::Error,
        ] {
            assert_eq!(status.to_string().parse::<OperationStatus>(), Ok(status));
        }
    }
}
