//! # OLASimple Configuration
//!
//! Process-wide configuration for the kit/sample codec and the batch scheduler.
//! Values are loaded once at startup, validated, and shared immutably behind an
//! `Arc` into every component that needs them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use olasimple_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let batch_size = manager.config().batch_size;
//! # Ok(())
//! # }
//! ```

pub mod loader;

use crate::constants::{associations, defaults};
use crate::error::{OlaError, OlaResult};
use serde::{Deserialize, Serialize};

pub use loader::ConfigManager;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OlaConfig {
    /// Samples per kit, and operations per scheduled job
    pub batch_size: u32,

    /// Digit width of zero-padded kit ids
    pub kit_num_digits: usize,

    /// Digit width of zero-padded sample ids
    pub sample_num_digits: usize,

    /// Login of the user jobs are scheduled under
    pub scheduler_user: String,

    /// Association key holding an operation's kit id
    pub kit_key: String,

    /// Scan attempts before a validation gives up
    pub max_validation_tries: u32,

    /// Copy operation annotations onto the enclosing plan
    pub propagate_errors_to_plan: bool,

    /// Debug mode: scan validations accept immediately
    pub debug: bool,
}

impl Default for OlaConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::BATCH_SIZE,
            kit_num_digits: defaults::KIT_NUM_DIGITS,
            sample_num_digits: defaults::SAMPLE_NUM_DIGITS,
            scheduler_user: defaults::SCHEDULER_USER.to_string(),
            kit_key: associations::KIT_KEY.to_string(),
            max_validation_tries: defaults::MAX_VALIDATION_TRIES,
            propagate_errors_to_plan: true,
            debug: false,
        }
    }
}

impl OlaConfig {
    /// Batch size as a collection length
    pub fn batch_len(&self) -> usize {
        self.batch_size as usize
    }

    /// Validate configuration invariants
    pub fn validate(&self) -> OlaResult<()> {
        if self.batch_size < 1 {
            return Err(OlaError::ConfigurationError(
                "batch_size must be at least 1".to_string(),
            ));
        }

        if self.kit_num_digits < 1 {
            return Err(OlaError::ConfigurationError(
                "kit_num_digits must be at least 1".to_string(),
            ));
        }

        if self.sample_num_digits < 1 {
            return Err(OlaError::ConfigurationError(
                "sample_num_digits must be at least 1".to_string(),
            ));
        }

        if self.max_validation_tries < 1 {
            return Err(OlaError::ConfigurationError(
                "max_validation_tries must be at least 1".to_string(),
            ));
        }

        if self.kit_key.trim().is_empty() {
            return Err(OlaError::ConfigurationError(
                "kit_key must not be empty".to_string(),
            ));
        }

        if self.scheduler_user.trim().is_empty() {
            return Err(OlaError::ConfigurationError(
                "scheduler_user must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
