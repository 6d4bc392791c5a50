//! # System Constants
//!
//! Association keys and built-in defaults shared by the codec, the scheduler,
//! and the propagation helpers.

/// Association keys attached to items and operations by the host platform
pub mod associations {
    pub const KIT_KEY: &str = "kit";
    pub const SAMPLE_KEY: &str = "sample";
    pub const PATIENT_KEY: &str = "patient";
    pub const COMPONENT_KEY: &str = "component";
    pub const UNIT_KEY: &str = "unit";

    /// Keys carried forward from an operation's input item to its output item
    pub const PROPAGATION_KEYS: [&str; 3] = [KIT_KEY, SAMPLE_KEY, PATIENT_KEY];

    /// Every key that describes where an item sits within a kit
    pub const ALL_KIT_KEYS: [&str; 5] = [KIT_KEY, SAMPLE_KEY, PATIENT_KEY, COMPONENT_KEY, UNIT_KEY];

    /// Scratch key for a value read from the input item
    pub fn input_key(key: &str) -> String {
        format!("input_{key}")
    }

    /// Scratch key for a value staged for the output item
    pub fn output_key(key: &str) -> String {
        format!("output_{key}")
    }
}

/// Built-in configuration defaults
pub mod defaults {
    pub const BATCH_SIZE: u32 = 2;
    pub const KIT_NUM_DIGITS: usize = 3;
    pub const SAMPLE_NUM_DIGITS: usize = 3;
    pub const SCHEDULER_USER: &str = "neptune";
    pub const MAX_VALIDATION_TRIES: u32 = 5;
}

/// Annotation messages recorded on operations
pub mod messages {
    pub const NO_KIT: &str =
        "This operation did not have an associated kit id and couldn't be batched";
    pub const SAMPLE_PROBLEM: &str = "Incoming samples are wrong and could not be resolved";
    pub const PACKAGE_PROBLEM: &str = "Package id is wrong and could not be resolved";

    pub fn batch_too_big(kit: &str, batch_size: u32, count: usize) -> String {
        format!(
            "There are too many samples being run with kit {kit}. The Batch size is set to \
             {batch_size}, but there are {count} operations in the batch."
        )
    }
}
