//! Errors - transform 実行時のエラー型
//!
//! - `TransformError`: transformer が返すエラー（中身は問わない）
//! - `TransformFailure`: envelope が捕捉して保存する失敗（エラー or panic）

use std::any::Any;
use std::error::Error;
use std::sync::Arc;

/// Error type returned by a transformation capability.
///
/// I/O エラー、検証エラーなど何でも入る。envelope は中身を解釈しない。
pub type TransformError = Box<dyn Error + Send + Sync + 'static>;

/// The failure captured by one envelope execution.
///
/// `Clone` so the scheduler can keep a copy after handing the envelope back.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransformFailure {
    /// The transformer returned an error. The original instance is kept.
    #[error(transparent)]
    Error(Arc<dyn Error + Send + Sync + 'static>),

    /// The transformer panicked while unwinding was possible.
    #[error("transform panicked: {message}")]
    Panicked { message: String },
}

impl TransformFailure {
    pub(crate) fn from_error(error: TransformError) -> Self {
        TransformFailure::Error(Arc::from(error))
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        TransformFailure::Panicked {
            message: panic_message(payload),
        }
    }

    /// Access the raised error as its concrete type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            TransformFailure::Error(e) => (**e).downcast_ref::<E>(),
            TransformFailure::Panicked { .. } => None,
        }
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, TransformFailure::Panicked { .. })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
