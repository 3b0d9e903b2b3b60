//! ExecutorBuilder - executor の構築
//!
//! build() 時に設定を検証する（Fail-fast 設計）。

use super::config::ExecutorConfig;
use super::executor::OperationExecutor;

/// # 使用例
/// ```ignore
/// let executor = ExecutorBuilder::new()
///     .config(ExecutorConfig::from_file(path)?)
///     .max_workers(2)
///     .build()?;
/// ```
///
/// 後から呼んだ setter が勝つので、`config()` の後に個別の値で上書きできる。
#[derive(Debug, Clone, Default)]
pub struct ExecutorBuilder {
    config: ExecutorConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("max_workers must be at least 1")]
    ZeroWorkers,
}

impl ExecutorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_workers(mut self, n: usize) -> Self {
        self.config.max_workers = n;
        self
    }

    pub fn record_operations(mut self, enabled: bool) -> Self {
        self.config.record_operations = enabled;
        self
    }

    pub fn build(self) -> Result<OperationExecutor, BuildError> {
        if self.config.max_workers == 0 {
            return Err(BuildError::ZeroWorkers);
        }
        Ok(OperationExecutor::new(self.config))
    }
}
