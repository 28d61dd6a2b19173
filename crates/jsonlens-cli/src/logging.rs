//! File-backed tracing setup.
//!
//! The explorer owns the terminal, so logs go to `$JSONLENS_HOME/jsonlens.log`
//! instead of stderr. `JSONLENS_LOG` takes the usual `EnvFilter` syntax and
//! wins over the configured `log_level`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use jsonlens_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "JSONLENS_LOG";

/// Installs the global subscriber.
///
/// The returned guard flushes buffered lines on drop; keep it alive until
/// the program exits.
pub fn init(default_level: &str) -> Result<WorkerGuard> {
    let log_path = paths::log_path();
    let dir = log_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::jsonlens_home);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_name = log_path.file_name().context("Log path has no file name")?;
    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
