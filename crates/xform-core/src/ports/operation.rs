//! RunnableOperation port - build operation executor との契約
//!
//! executor は description() で operation tree に登録し、
//! run() で実行します。結果の解釈は executor ではなく呼び出し側の仕事です。

use serde::{Deserialize, Serialize};

use crate::domain::{OperationCategory, OperationId};

/// Metadata registered in the operation tree for one operation.
///
/// # 使用例
/// ```ignore
/// let descriptor = OperationDescriptor::display_name("Transform a.jar with Unzip")
///     .progress_display_name("Transform a.jar with Unzip")
///     .operation_type(OperationCategory::Transform);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_display_name: Option<String>,

    #[serde(default)]
    pub category: OperationCategory,
}

impl OperationDescriptor {
    pub fn display_name(name: impl Into<String>) -> Self {
        Self {
            display_name: name.into(),
            progress_display_name: None,
            category: OperationCategory::Unspecified,
        }
    }

    pub fn progress_display_name(mut self, name: impl Into<String>) -> Self {
        self.progress_display_name = Some(name.into());
        self
    }

    pub fn operation_type(mut self, category: OperationCategory) -> Self {
        self.category = category;
        self
    }
}

/// Per-execution handle handed to `RunnableOperation::run`.
#[derive(Debug, Clone)]
pub struct OperationContext {
    id: OperationId,
    parent: Option<OperationId>,
    status: Option<String>,
}

impl OperationContext {
    pub fn new(id: OperationId, parent: Option<OperationId>) -> Self {
        Self {
            id,
            parent,
            status: None,
        }
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn parent(&self) -> Option<OperationId> {
        self.parent
    }

    /// Short status text shown next to the operation in reports.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(crate) fn into_status(self) -> Option<String> {
        self.status
    }
}

/// A unit of work the executor can register and run.
///
/// `run` must not panic or return errors to the executor; failures are
/// kept inside the operation for the caller to inspect afterwards.
pub trait RunnableOperation: Send {
    fn run(&mut self, context: Option<&mut OperationContext>);

    fn description(&self) -> OperationDescriptor;
}
