//! Log setup for hosts that embed the processor.

use crate::error::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// File name prefix, e.g. `processor` gives `processor.2026-01-21`.
    pub component: String,
    /// Defaults to `~/.beanscope/logs`.
    pub directory: Option<PathBuf>,
    pub to_stderr: bool,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            component: "processor".to_string(),
            directory: None,
            to_stderr: false,
            default_filter: "info".to_string(),
        }
    }
}

pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| ".".into())
        .join(".beanscope")
        .join("logs")
}

/// Install a daily-rolling file subscriber, plus stderr when asked.
///
/// Keep the returned guard alive for as long as logs should be flushed.
/// A subscriber installed earlier by the host wins; ours is then only the
/// file writer behind the guard.
pub fn init_logging(options: &LogOptions) -> Result<WorkerGuard> {
    let log_dir = options.directory.clone().unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, &options.component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.default_filter));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = options.to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
    if installed.is_err() {
        tracing::debug!("subscriber already installed, keeping it");
    }

    Ok(guard)
}
