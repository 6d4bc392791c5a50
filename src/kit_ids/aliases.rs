//! Sample alias assignment.
//!
//! Operations in a kit batch are ordered by an externally supplied key (the
//! patient id, or arrival order) and then paired positionally with the kit's
//! sample numbers, lowest first.

use super::codec::{KitIdCodec, SampleNumber};
use crate::constants::associations::{self, KIT_KEY, PATIENT_KEY, SAMPLE_KEY};
use crate::error::{OlaError, OlaResult};
use crate::models::{Operation, OperationId};
use serde_json::Value;

/// Sample ids a technician should scan for `kit_num`, ascending
pub fn expected_sample_ids(codec: &KitIdCodec, kit_num: i64) -> OlaResult<Vec<String>> {
    codec
        .sample_nums_from_kit_num(kit_num)?
        .into_iter()
        .map(|n| codec.sample_num_to_id(sample_as_i64(n)?))
        .collect()
}

/// Patient id staged from the input item, used as the default ordering key
pub fn patient_sort_key(op: &Operation) -> Option<String> {
    op.temporary_str(&associations::input_key(PATIENT_KEY))
        .map(str::to_string)
}

/// Sort `ops` by `sort_key` and stage the kit's sample ids onto them in order.
///
/// Writes `output_kit` and `output_sample` into each operation's temporary map
/// and returns the resulting (operation, sample id) pairs.
pub fn assign_sample_numbers<K, F>(
    codec: &KitIdCodec,
    ops: &mut [Operation],
    kit_num: i64,
    sort_key: F,
) -> OlaResult<Vec<(OperationId, String)>>
where
    K: Ord,
    F: FnMut(&Operation) -> K,
{
    let sample_nums = codec.sample_nums_from_kit_num(kit_num)?;
    if ops.len() != sample_nums.len() {
        return Err(OlaError::BatchSizeMismatch {
            expected: sample_nums.len(),
            actual: ops.len(),
        });
    }

    let kit_id = codec.kit_num_to_id(kit_num)?;
    ops.sort_by_key(sort_key);

    let mut assigned = Vec::with_capacity(ops.len());
    for (op, sample_num) in ops.iter_mut().zip(sample_nums) {
        let sample_id = codec.sample_num_to_id(sample_as_i64(sample_num)?)?;
        op.temporary.insert(
            associations::output_key(KIT_KEY),
            Value::String(kit_id.clone()),
        );
        op.temporary.insert(
            associations::output_key(SAMPLE_KEY),
            Value::String(sample_id.clone()),
        );
        assigned.push((op.id, sample_id));
    }

    crate::log_kit!(debug, "SAMPLE_ALIASES_ASSIGNED",
        kit: kit_id,
        assigned: assigned.len()
    );

    Ok(assigned)
}

fn sample_as_i64(num: SampleNumber) -> OlaResult<i64> {
    i64::try_from(num)
        .map_err(|_| OlaError::InvalidArgument(format!("sample number {num} out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OlaConfig;
    use crate::models::OperationTypeId;
    use std::sync::Arc;

    fn codec() -> KitIdCodec {
        KitIdCodec::new(Arc::new(OlaConfig::default()))
    }

    fn op_with_patient(id: i64, patient: &str) -> Operation {
        let mut op = Operation::new(OperationId(id), OperationTypeId(1));
        op.temporary.insert(
            associations::input_key(PATIENT_KEY),
            Value::String(patient.to_string()),
        );
        op
    }

    #[test]
    fn expected_ids_for_kit_three() {
        assert_eq!(expected_sample_ids(&codec(), 3).unwrap(), vec!["005", "006"]);
    }

    #[test]
    fn samples_follow_patient_order() {
        let codec = codec();
        let mut ops = vec![op_with_patient(10, "P-20"), op_with_patient(11, "P-03")];

        let assigned = assign_sample_numbers(&codec, &mut ops, 2, patient_sort_key).unwrap();

        assert_eq!(
            assigned,
            vec![
                (OperationId(11), "003".to_string()),
                (OperationId(10), "004".to_string())
            ]
        );
        assert_eq!(ops[0].temporary_str("output_sample"), Some("003"));
        assert_eq!(ops[0].temporary_str("output_kit"), Some("002"));
        assert_eq!(ops[1].temporary_str("output_sample"), Some("004"));
    }

    #[test]
    fn wrong_operation_count_is_rejected() {
        let codec = codec();
        let mut ops = vec![op_with_patient(1, "a")];
        let result = assign_sample_numbers(&codec, &mut ops, 1, |op| op.id);
        assert_eq!(
            result,
            Err(OlaError::BatchSizeMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert!(ops[0].temporary_str("output_sample").is_none());
    }
}
