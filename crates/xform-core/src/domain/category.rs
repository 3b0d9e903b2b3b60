//! OperationCategory - reporting 用の分類タグ

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of an operation in the operation tree.
///
/// Serialized as SCREAMING_SNAKE_CASE so reports can group on a stable name.
/// It never changes how an operation is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationCategory {
    /// Artifact transformation (the usual tag for envelopes).
    Transform,

    /// A unit of work scheduled as a build task.
    Task,

    /// Project configuration work.
    ConfigureProject,

    #[default]
    Unspecified,
}

impl OperationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationCategory::Transform => "TRANSFORM",
            OperationCategory::Task => "TASK",
            OperationCategory::ConfigureProject => "CONFIGURE_PROJECT",
            OperationCategory::Unspecified => "UNSPECIFIED",
        }
    }
}

impl fmt::Display for OperationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
