//! ArtifactTransformer port - 変換処理の抽象化
//!
//! 具体的な変換（unzip, copy, split など）は外から注入されます。
//! envelope はこの trait だけに依存し、実装を生成しません。

use crate::domain::{FileRef, TransformError};

/// A transformation capability: one input file to zero or more output files.
///
/// # 使用例
/// ```ignore
/// struct Unzip;
///
/// impl ArtifactTransformer for Unzip {
///     fn display_name(&self) -> String {
///         "Unzip".to_string()
///     }
///
///     fn transform(&self, file: &FileRef) -> Result<Vec<FileRef>, TransformError> {
///         extract_entries(file.path())
///     }
/// }
/// ```
///
/// `Send + Sync` because the same transformer is shared by envelopes
/// running on different worker threads.
pub trait ArtifactTransformer: Send + Sync {
    /// Human-readable name used in logs and operation descriptions.
    fn display_name(&self) -> String;

    /// Transform `file`. The returned order is preserved by the envelope.
    fn transform(&self, file: &FileRef) -> Result<Vec<FileRef>, TransformError>;
}
