//! ExecutorConfig - executor の設定
//!
//! JSON ファイル（CLI の `--config`）から読み込み、未指定の項目は default を使う。

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const FALLBACK_WORKERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Upper bound on operations running at the same time.
    pub max_workers: usize,

    /// Record every operation in the executor's operation log.
    pub record_operations: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid executor config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_workers: default_workers(),
            record_operations: true,
        }
    }
}

impl ExecutorConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_WORKERS)
}
