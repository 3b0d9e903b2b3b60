//! OperationExecutor - operation を worker スレッドで並列実行する
//!
//! - description() を operation log に登録してから run() する
//! - 同時実行数は max_workers で制限（Semaphore）
//! - run() は blocking なので spawn_blocking で実行
//! - 実行後の operation は投入順のまま呼び出し側に返す（結果の解釈は呼び出し側）

use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinHandle};

use super::builder::ExecutorBuilder;
use super::config::ExecutorConfig;
use super::operation_log::OperationLog;
use crate::domain::OperationId;
use crate::ports::{OperationContext, RunnableOperation};

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("operation #{index} did not complete: {source}")]
    WorkerJoin {
        index: usize,
        #[source]
        source: JoinError,
    },

    #[error("worker pool closed: {0}")]
    PoolClosed(#[from] AcquireError),
}

/// Concurrency is bounded per executor: concurrent `run`/`run_all` calls share
/// the same `max_workers` permits.
pub struct OperationExecutor {
    max_workers: usize,
    record_operations: bool,
    permits: Arc<Semaphore>,
    log: Arc<OperationLog>,
}

impl OperationExecutor {
    pub(crate) fn new(config: ExecutorConfig) -> Self {
        Self {
            max_workers: config.max_workers,
            record_operations: config.record_operations,
            permits: Arc::new(Semaphore::new(config.max_workers)),
            log: Arc::new(OperationLog::new()),
        }
    }

    pub fn builder() -> ExecutorBuilder {
        ExecutorBuilder::new()
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    /// Run one operation and hand it back.
    pub async fn run<O>(&self, parent: Option<OperationId>, operation: O) -> Result<O, ExecutorError>
    where
        O: RunnableOperation + 'static,
    {
        let permit = Arc::clone(&self.permits).acquire_owned().await?;
        self.spawn(parent, operation, permit)
            .await
            .map_err(|source| ExecutorError::WorkerJoin { index: 0, source })
    }

    /// Run all operations, at most `max_workers` at a time.
    ///
    /// The returned operations are in submission order. When a worker fails
    /// to join, the remaining workers are still awaited before the first
    /// such error is returned.
    pub async fn run_all<O>(
        &self,
        parent: Option<OperationId>,
        operations: Vec<O>,
    ) -> Result<Vec<O>, ExecutorError>
    where
        O: RunnableOperation + 'static,
    {
        let mut joins = Vec::with_capacity(operations.len());

        for operation in operations {
            let permit = Arc::clone(&self.permits).acquire_owned().await?;
            joins.push(self.spawn(parent, operation, permit));
        }

        // every handle is awaited so no operation is left running unobserved
        let mut finished = Vec::with_capacity(joins.len());
        let mut first_error = None;
        for (index, join) in joins.into_iter().enumerate() {
            match join.await {
                Ok(operation) => finished.push(operation),
                Err(source) => {
                    tracing::error!(index, error = %source, "operation worker did not complete");
                    first_error.get_or_insert(ExecutorError::WorkerJoin { index, source });
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(finished),
        }
    }

    fn spawn<O>(
        &self,
        parent: Option<OperationId>,
        mut operation: O,
        permit: OwnedSemaphorePermit,
    ) -> JoinHandle<O>
    where
        O: RunnableOperation + 'static,
    {
        let id = OperationId::generate();
        let descriptor = operation.description();
        tracing::debug!(
            operation = %id,
            category = %descriptor.category,
            "{}",
            descriptor.display_name
        );

        let log = if self.record_operations {
            self.log.start(id, parent, descriptor);
            Some(Arc::clone(&self.log))
        } else {
            None
        };

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let mut context = OperationContext::new(id, parent);
            operation.run(Some(&mut context));
            if let Some(log) = log {
                log.finish(id, context.into_status());
            }
            operation
        })
    }
}
