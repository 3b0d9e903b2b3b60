//! OperationLog - operation tree の記録（in-memory）

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::OperationId;
use crate::ports::OperationDescriptor;

/// One node of the operation tree.
#[derive(Debug, Clone, Serialize)]
pub struct OperationRecord {
    pub id: OperationId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<OperationId>,

    pub descriptor: OperationDescriptor,

    pub started_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    /// Status text set by the operation through its context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl OperationRecord {
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

/// Records are kept in registration order.
///
/// 書き込みは worker スレッドから来るので std の Mutex を使う（ロック中に await しない）。
#[derive(Debug, Default)]
pub struct OperationLog {
    records: Mutex<Vec<OperationRecord>>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<OperationRecord>> {
        // a panicking writer cannot leave a record half-written
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(
        &self,
        id: OperationId,
        parent: Option<OperationId>,
        descriptor: OperationDescriptor,
    ) {
        self.lock().push(OperationRecord {
            id,
            parent,
            descriptor,
            started_at: Utc::now(),
            finished_at: None,
            status: None,
        });
    }

    /// Returns `false` when `id` was never started.
    pub fn finish(&self, id: OperationId, status: Option<String>) -> bool {
        let mut records = self.lock();
        match records.iter_mut().rev().find(|r| r.id == id) {
            Some(record) => {
                record.finished_at = Some(Utc::now());
                record.status = status;
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> Vec<OperationRecord> {
        self.lock().clone()
    }

    pub fn children_of(&self, parent: OperationId) -> Vec<OperationRecord> {
        self.lock()
            .iter()
            .filter(|r| r.parent == Some(parent))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
