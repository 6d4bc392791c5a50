//! # Kit and Sample Ids
//!
//! Deterministic mapping between flat sample numbers and (kit, slot) pairs,
//! plus the helpers that stage those ids onto operations.

pub mod aliases;
pub mod codec;
pub mod propagation;

pub use aliases::{assign_sample_numbers, expected_sample_ids, patient_sort_key};
pub use codec::{KitIdCodec, KitNumber, SampleNumber};
pub use propagation::{
    populate_debug_kit_info, populate_temporary_from_associations, set_output_component_and_unit,
};
