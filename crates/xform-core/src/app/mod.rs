//! App - アプリケーション層
//!
//! ports を組み合わせて実行まわりを実装します。
//!
//! # 主要コンポーネント
//! - **TransformFileOperation**: 1 ファイル分の変換を包む実行単位（envelope）
//! - **OperationExecutor**: operation を worker スレッドで並列実行
//! - **ExecutorBuilder / ExecutorConfig**: executor の構築と設定
//! - **OperationLog**: operation tree の記録
//! - **TransformerRegistry**: 名前から transformer を引く
//! - **TransformSummary**: 実行結果の集計

pub mod builder;
pub mod config;
pub mod executor;
pub mod operation_log;
pub mod registry;
pub mod status;
pub mod transform_operation;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, ExecutorBuilder};
pub use self::config::{ConfigError, ExecutorConfig};
pub use self::executor::{ExecutorError, OperationExecutor};
pub use self::operation_log::{OperationLog, OperationRecord};
pub use self::registry::{RegistryError, TransformerRegistry};
pub use self::status::TransformSummary;
pub use self::transform_operation::TransformFileOperation;
