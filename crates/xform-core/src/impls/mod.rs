//! Impls - ArtifactTransformer の実装
//!
//! - FnTransformer: closure をそのまま transformer にする（テスト・組み込み用）
//! - CopyTransformer / SplitLinesTransformer: CLI から使う実ファイル向け

pub mod copy;
pub mod fn_transformer;
pub mod split_lines;

pub use self::copy::{CopyError, CopyTransformer};
pub use self::fn_transformer::FnTransformer;
pub use self::split_lines::{SplitError, SplitLinesTransformer};
