//! # Logging
//!
//! Tracing setup. The TUI owns the terminal, so log events go to a file
//! instead of stdout:
//!
//! ```text
//! ~/.local/share/primer/logs/primer.log
//! ```
//!
//! Precedence for the filter: `RUST_LOG` env var > `--log-level` > `info`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "primer.log";

/// Default log directory under the platform data directory.
pub fn default_log_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "primer")
        .context("Could not determine data directory")?;
    Ok(dirs.data_local_dir().join("logs"))
}

/// Build the filter used for `level` unless `RUST_LOG` is set.
pub fn build_filter(level: &str) -> EnvFilter {
    let default_filter = format!("primer={}", level);
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber writing to `dir`.
///
/// The returned guard flushes buffered lines on drop; keep it alive for the
/// whole run.
pub fn init(dir: &Path, level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_log_directory() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let log_dir = temp_dir.path().join("nested").join("logs");

        // A subscriber may already be installed by another test; the
        // directory is created before that matters.
        let _ = init(&log_dir, "debug");
        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_default_log_dir_ends_with_logs() {
        if let Ok(dir) = default_log_dir() {
            assert!(dir.ends_with("logs"));
        }
    }
}
