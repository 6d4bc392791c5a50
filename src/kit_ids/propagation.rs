//! Staging of kit associations between an operation's input and output items.

use super::codec::KitIdCodec;
use crate::constants::associations::{
    self, ALL_KIT_KEYS, COMPONENT_KEY, KIT_KEY, PATIENT_KEY, PROPAGATION_KEYS, SAMPLE_KEY,
    UNIT_KEY,
};
use crate::error::OlaResult;
use crate::models::Operation;
use serde_json::Value;
use std::collections::HashMap;

/// Copy kit associations read from the input item into `op.temporary`.
///
/// Every kit key present becomes `input_<key>`; the propagated keys (kit,
/// sample, patient) are also staged as `output_<key>`. Other keys are ignored.
pub fn populate_temporary_from_associations(
    op: &mut Operation,
    input_associations: &HashMap<String, Value>,
) {
    for key in ALL_KIT_KEYS {
        let Some(value) = input_associations.get(key) else {
            continue;
        };
        op.temporary
            .insert(associations::input_key(key), value.clone());
        if PROPAGATION_KEYS.contains(&key) {
            op.temporary
                .insert(associations::output_key(key), value.clone());
        }
    }
}

/// Debug seeding: every operation belongs to kit 1, samples and patients numbered in order
pub fn populate_debug_kit_info(codec: &KitIdCodec, ops: &mut [Operation]) -> OlaResult<()> {
    let kit_id = codec.kit_num_to_id(1)?;
    for (i, op) in ops.iter_mut().enumerate() {
        let sample_id = codec.sample_num_to_id(i as i64 + 1)?;
        let patient = (i + 1).to_string();
        for (key, value) in [
            (KIT_KEY, &kit_id),
            (SAMPLE_KEY, &sample_id),
            (PATIENT_KEY, &patient),
        ] {
            op.temporary
                .insert(associations::input_key(key), Value::String(value.clone()));
            op.temporary
                .insert(associations::output_key(key), Value::String(value.clone()));
        }
    }
    Ok(())
}

/// Stage the component and unit the operation's output item will carry
pub fn set_output_component_and_unit(op: &mut Operation, component: &str, unit: &str) {
    op.temporary
        .insert(COMPONENT_KEY.to_string(), Value::String(component.to_string()));
    op.temporary
        .insert(UNIT_KEY.to_string(), Value::String(unit.to_string()));
}
