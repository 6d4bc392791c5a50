//! Scan validation for incoming samples and kit packages.
//!
//! Technicians scan barcodes through the host UI ([`ScanPrompt`]). Scans are
//! compared with the ids the codec expects; after `max_validation_tries`
//! failed rounds every operation in the job is annotated and the caller gets
//! [`OlaError::ValidationExhausted`].

use crate::config::OlaConfig;
use crate::constants::messages;
use crate::error::{AnnotationKind, OlaError, OlaResult};
use crate::kit_ids::{expected_sample_ids, KitIdCodec};
use crate::models::Operation;
use crate::store::OperationStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Operator-facing scan prompts supplied by the host
#[async_trait]
pub trait ScanPrompt: Send + Sync {
    /// One scan slot per expected id; unanswered slots are `None`
    async fn scan_samples(&self, expected: &[String]) -> OlaResult<Vec<Option<String>>>;

    async fn scan_package(&self, package: &str) -> OlaResult<String>;

    /// Tell the operator the last round did not match
    async fn report_mismatch(&self, kind: AnnotationKind, expected: &[String]) -> OlaResult<()>;
}

/// Every expected slot must be filled by a distinct expected id, in any order
pub fn samples_match(expected: &[String], scanned: &[Option<String>]) -> bool {
    let mut remaining: Vec<&str> = expected.iter().map(String::as_str).collect();

    for slot in 0..expected.len() {
        let Some(scan) = scanned.get(slot).and_then(|s| s.as_deref()) else {
            return false;
        };
        match remaining.iter().position(|id| *id == scan.trim()) {
            Some(index) => {
                remaining.swap_remove(index);
            }
            None => return false,
        }
    }
    true
}

pub fn package_matches(expected: &str, scanned: &str) -> bool {
    expected == scanned.trim()
}

pub struct ScanValidator {
    config: Arc<OlaConfig>,
    codec: KitIdCodec,
    store: Arc<dyn OperationStore>,
}

impl ScanValidator {
    pub fn new(config: Arc<OlaConfig>, store: Arc<dyn OperationStore>) -> Self {
        Self {
            codec: KitIdCodec::new(Arc::clone(&config)),
            config,
            store,
        }
    }

    /// Validate scans against the sample ids owned by `kit_num`
    pub async fn validate_kit_samples(
        &self,
        prompt: &dyn ScanPrompt,
        ops: &mut [Operation],
        kit_num: i64,
    ) -> OlaResult<()> {
        let expected = expected_sample_ids(&self.codec, kit_num)?;
        self.sample_validation_with_multiple_tries(prompt, ops, &expected)
            .await
    }

    pub async fn sample_validation_with_multiple_tries(
        &self,
        prompt: &dyn ScanPrompt,
        ops: &mut [Operation],
        expected: &[String],
    ) -> OlaResult<()> {
        for attempt in 1..=self.config.max_validation_tries {
            let scanned = prompt.scan_samples(expected).await?;
            if samples_match(expected, &scanned) || self.config.debug {
                debug!(attempt, "Sample scan accepted");
                return Ok(());
            }
            warn!(attempt, expected = ?expected, scanned = ?scanned, "Sample scan mismatch");
            prompt
                .report_mismatch(AnnotationKind::SampleProblem, expected)
                .await?;
        }

        self.give_up(ops, AnnotationKind::SampleProblem, messages::SAMPLE_PROBLEM)
            .await
    }

    pub async fn package_validation_with_multiple_tries(
        &self,
        prompt: &dyn ScanPrompt,
        ops: &mut [Operation],
        package: &str,
    ) -> OlaResult<()> {
        let expected = [package.to_string()];
        for attempt in 1..=self.config.max_validation_tries {
            let scanned = prompt.scan_package(package).await?;
            if package_matches(package, &scanned) || self.config.debug {
                debug!(attempt, package, "Package scan accepted");
                return Ok(());
            }
            warn!(attempt, package, scanned = %scanned, "Package scan mismatch");
            prompt
                .report_mismatch(AnnotationKind::PackageProblem, &expected)
                .await?;
        }

        self.give_up(ops, AnnotationKind::PackageProblem, messages::PACKAGE_PROBLEM)
            .await
    }

    async fn give_up(
        &self,
        ops: &mut [Operation],
        kind: AnnotationKind,
        message: &str,
    ) -> OlaResult<()> {
        for op in ops.iter_mut() {
            op.record_error(kind, message);
            self.store.save(op).await?;
        }
        Err(OlaError::ValidationExhausted {
            kind,
            attempts: self.config.max_validation_tries,
        })
    }
}
