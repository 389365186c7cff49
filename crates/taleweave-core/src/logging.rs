//! File-based tracing setup.
//!
//! The TUI owns the terminal's alternate screen, so logs go to
//! `<home>/logs/taleweave.log` instead of stderr. Filtering follows
//! `TALEWEAVE_LOG` (e.g. `TALEWEAVE_LOG=taleweave_core=debug`), defaulting
//! to `info`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

pub const LOG_ENV_VAR: &str = "TALEWEAVE_LOG";
const LOG_FILE: &str = "taleweave.log";

/// Initializes file logging and returns the guard that flushes buffered
/// records. Drop the guard only at process exit.
pub fn init() -> Result<WorkerGuard> {
    init_at(&paths::logs_dir())
}

/// Initializes file logging under a specific directory.
pub fn init_at(logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::never(logs_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(guard)
}
