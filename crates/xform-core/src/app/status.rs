//! Status - 実行済み envelope の集計

use serde::{Deserialize, Serialize};

use super::transform_operation::TransformFileOperation;
use crate::domain::Outcome;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub not_run: usize,
    /// Total output files across successful envelopes.
    pub outputs: usize,
}

impl TransformSummary {
    pub fn from_operations(operations: &[TransformFileOperation]) -> Self {
        operations
            .iter()
            .fold(Self::default(), |mut summary, op| {
                match op.outcome() {
                    Outcome::NotYetRun => summary.not_run += 1,
                    Outcome::Success(files) => {
                        summary.succeeded += 1;
                        summary.outputs += files.len();
                    }
                    Outcome::Failure(_) => summary.failed += 1,
                }
                summary
            })
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
