//! Outcome model: write-once result of one envelope execution.
//!
//! "結果もエラーも無い" と "両方ある" を型で区別するため、
//! nullable な 2 フィールドではなく 3 状態の enum にしています。

use serde::Serialize;

use super::errors::TransformFailure;
use super::file::FileRef;

/// Result of running a transformation.
///
/// State transitions:
/// - NotYetRun -> Success
/// - NotYetRun -> Failure
///
/// There is no transition out of `Success` or `Failure`.
#[derive(Debug, Clone, Default)]
pub enum Outcome {
    #[default]
    NotYetRun,

    /// Output files in the order the transformer returned them (may be empty).
    Success(Vec<FileRef>),

    Failure(TransformFailure),
}

/// A unified classification of an outcome, for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    NotYetRun,
    Success,
    Failure,
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::NotYetRun => OutcomeKind::NotYetRun,
            Outcome::Success(_) => OutcomeKind::Success,
            Outcome::Failure(_) => OutcomeKind::Failure,
        }
    }

    pub fn is_completed(&self) -> bool {
        !matches!(self, Outcome::NotYetRun)
    }

    pub fn result(&self) -> Option<&[FileRef]> {
        match self {
            Outcome::Success(files) => Some(files),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&TransformFailure> {
        match self {
            Outcome::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// Convert into a plain `Result`, or `None` before the run.
    pub fn into_result(self) -> Option<Result<Vec<FileRef>, TransformFailure>> {
        match self {
            Outcome::NotYetRun => None,
            Outcome::Success(files) => Some(Ok(files)),
            Outcome::Failure(failure) => Some(Err(failure)),
        }
    }
}
