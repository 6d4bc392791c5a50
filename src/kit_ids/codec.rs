//! Kit and sample id codec.
//!
//! Kit and sample numbers are rendered as fixed-width, zero-padded strings so
//! that the trailing digits can always be sliced back out, whatever prefix a
//! caller has prepended (facility code, lot code). A kit owns exactly
//! `batch_size` consecutive sample numbers: kit `k` owns
//! `(k - 1) * batch_size + 1 ..= k * batch_size`.

use crate::config::OlaConfig;
use crate::error::{OlaError, OlaResult};
use std::sync::Arc;

/// Kit number, starting at 1
pub type KitNumber = u64;

/// System-wide sample number, starting at 1
pub type SampleNumber = u64;

/// Pure conversions between kit/sample numbers and their string ids
#[derive(Debug, Clone)]
pub struct KitIdCodec {
    config: Arc<OlaConfig>,
}

impl KitIdCodec {
    pub fn new(config: Arc<OlaConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OlaConfig {
        &self.config
    }

    pub fn batch_size(&self) -> u64 {
        u64::from(self.config.batch_size)
    }

    /// Zero-pad a sample number to the configured sample digit width
    pub fn sample_num_to_id(&self, num: i64) -> OlaResult<String> {
        let num = non_negative("sample number", num)?;
        Ok(pad(num, self.config.sample_num_digits))
    }

    /// Zero-pad a kit number to the configured kit digit width
    pub fn kit_num_to_id(&self, num: i64) -> OlaResult<String> {
        let num = non_negative("kit number", num)?;
        Ok(pad(num, self.config.kit_num_digits))
    }

    /// Kit number from the trailing kit digits of `id`.
    ///
    /// Returns `None` when `id` is shorter than the kit digit width or the
    /// trailing characters are not all ASCII digits.
    pub fn extract_kit_number(&self, id: &str) -> Option<KitNumber> {
        trailing_number(id, self.config.kit_num_digits)
    }

    /// Sample number from the trailing sample digits of `id`; see [`Self::extract_kit_number`]
    pub fn extract_sample_number(&self, id: &str) -> Option<SampleNumber> {
        trailing_number(id, self.config.sample_num_digits)
    }

    /// Kit that owns `sample_num`
    pub fn kit_num_from_sample_num(&self, sample_num: i64) -> OlaResult<KitNumber> {
        let sample_num = positive("sample number", sample_num)?;
        Ok((sample_num - 1) / self.batch_size() + 1)
    }

    /// Sample numbers owned by `kit_num`, ascending.
    ///
    /// The i-th entry is the sample assigned to the i-th operation of the kit's batch.
    pub fn sample_nums_from_kit_num(&self, kit_num: i64) -> OlaResult<Vec<SampleNumber>> {
        let kit_num = positive("kit number", kit_num)?;
        let batch_size = self.batch_size();
        let highest = kit_num.checked_mul(batch_size).ok_or_else(|| {
            OlaError::InvalidArgument(format!(
                "kit number {kit_num} overflows with batch size {batch_size}"
            ))
        })?;

        let mut sample_nums: Vec<SampleNumber> = (0..batch_size).map(|i| highest - i).collect();
        sample_nums.reverse();
        Ok(sample_nums)
    }
}

fn pad(num: u64, width: usize) -> String {
    format!("{num:0width$}")
}

fn non_negative(what: &str, num: i64) -> OlaResult<u64> {
    u64::try_from(num)
        .map_err(|_| OlaError::InvalidArgument(format!("{what} must not be negative, got {num}")))
}

fn positive(what: &str, num: i64) -> OlaResult<u64> {
    if num < 1 {
        return Err(OlaError::InvalidArgument(format!(
            "{what} must be at least 1, got {num}"
        )));
    }
    Ok(num as u64)
}

fn trailing_number(id: &str, digits: usize) -> Option<u64> {
    let char_count = id.chars().count();
    if char_count < digits {
        return None;
    }

    let tail: String = id.chars().skip(char_count - digits).collect();
    if tail.is_empty() || !tail.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}
