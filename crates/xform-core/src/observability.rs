//! Observability - tracing subscriber の初期化
//!
//! ライブラリ側は `tracing` のマクロを呼ぶだけ。subscriber を入れるのはバイナリの仕事。

use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Install a `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` wins over `default_level` when set. Returns `Ok(false)` when a
/// subscriber was already installed by an earlier call.
pub fn init_tracing(default_level: &str) -> Result<bool, ParseError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)?,
    };

    if INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Ok(false);
    }

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();
    Ok(installed)
}
