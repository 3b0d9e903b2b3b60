//! xform-core
//!
//! Panic-safe execution of single-file artifact transformations as
//! trackable build operations.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, file, category, outcome, errors）
//! - **ports**: 抽象化レイヤー（ArtifactTransformer, RunnableOperation）
//! - **app**: envelope（TransformFileOperation）, executor, builder, config, operation log
//! - **impls**: transformer の実装（FnTransformer, CopyTransformer, SplitLinesTransformer）
//! - **observability**: tracing subscriber の初期化

pub mod app;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;

pub use app::{OperationExecutor, TransformFileOperation};
pub use domain::{FileRef, OperationCategory, Outcome, TransformError, TransformFailure};
pub use ports::{ArtifactTransformer, OperationContext, OperationDescriptor, RunnableOperation};
