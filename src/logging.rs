//! Logging initialization.
//!
//! Stderr logging is always on (filterable via `RUST_LOG`); file logging
//! with daily rotation is enabled when the config names a directory.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Keep this alive for the program's lifetime; dropping it flushes and stops
/// the non-blocking file writer.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

pub fn init_logging(config: &LoggingConfig, workspace_root: &Path) -> Result<LoggingGuard> {
    let stderr_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(&config.level)));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let mut file_guard = None;
    let file_layer = match &config.directory {
        Some(directory) => {
            let log_dir = resolve_log_dir(directory, workspace_root);
            std::fs::create_dir_all(&log_dir)
                .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

            let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &config.file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(EnvFilter::new(level_directive(&config.level))),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to initialize logging subscriber")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn resolve_log_dir(directory: &Path, workspace_root: &Path) -> PathBuf {
    if directory.is_absolute() {
        directory.to_path_buf()
    } else {
        workspace_root.join(directory)
    }
}

fn level_directive(level: &str) -> String {
    let level = match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => level.to_lowercase(),
        other => {
            eprintln!("Warning: Unknown log level '{}', defaulting to 'info'", other);
            "info".to_string()
        }
    };
    format!("symnav={}", level)
}
