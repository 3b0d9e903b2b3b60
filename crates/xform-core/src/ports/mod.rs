//! Ports - 抽象化レイヤー
//!
//! envelope が外部と接する 2 つの契約を定義します。
//! - **ArtifactTransformer**: 注入される変換処理
//! - **RunnableOperation**: build operation executor から見た実行単位

pub mod operation;
pub mod transformer;

pub use self::operation::{OperationContext, OperationDescriptor, RunnableOperation};
pub use self::transformer::ArtifactTransformer;
