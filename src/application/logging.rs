//! # Logging Setup
//!
//! Installs the global `tracing` subscriber: an opt-in plain-text file layer
//! (non-blocking, via `tracing-appender`) and a console layer.
//!
//! The console layer always writes to stderr. With the stdio transport, stdout
//! carries protocol frames and a stray log line would corrupt the stream.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::domain::config::LoggingConfig;
use crate::strings::logs;

/// Builds the filter: `RUST_LOG` when set, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Opens the session log inside `dir`, replacing any previous one.
pub fn open_log_file(dir: &Path, file: &str) -> Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)
        .with_context(|| logs::log_dir_create_error(&dir.display().to_string()))?;

    // Each run starts a fresh session log
    let log_path = dir.join(file);
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file)
        .build(dir)
        .with_context(|| logs::log_file_open_error(&log_path.display().to_string()))?;
    Ok(tracing_appender::non_blocking(file_appender))
}

/// Initializes logging. The returned guard must be held for the lifetime of
/// the process, or buffered file output is lost.
///
/// A log file that cannot be opened is not fatal: the server keeps running
/// with console logging only and reports why once the subscriber is up.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (writer, guard, file_error) = match &config.directory {
        Some(dir) => match open_log_file(dir, &config.file) {
            Ok((writer, guard)) => (Some(writer), Some(guard), None),
            Err(e) => (None, None, Some(e)),
        },
        None => (None, None, None),
    };

    let file_layer = writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
    });

    // Without a file the console is the only sink left.
    let console_layer = (config.console || file_layer.is_none()).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(e) = file_error {
        tracing::warn!("{}", logs::file_logging_disabled(&format!("{e:#}")));
    }

    Ok(guard)
}
