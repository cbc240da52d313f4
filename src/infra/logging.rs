//! For setting up logging.

use super::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Flushes logs upon being dropped.
#[derive(Debug)]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

/// Initializes logging.
///
/// `RUST_LOG` takes precedence over the configured default filter.
/// Logs go to stdout, and additionally as JSON to hourly files if a directory is configured.
pub fn init_logging(config: &LoggingConfig) -> LogGuard {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.default_filter.clone());

    let (non_blocking_stdout, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let stdout = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_stdout)
        .with_filter(EnvFilter::new(&log_level));
    let mut guards = vec![stdout_guard];

    let file = config.directory.as_ref().map(|directory| {
        let file_appender = tracing_appender::rolling::hourly(directory, "item-store.log");
        let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);
        guards.push(file_guard);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking_file)
            .json()
            .with_filter(EnvFilter::new(&log_level))
    });

    tracing_subscriber::registry()
        .with(stdout)
        .with(file)
        .with(ErrorLayer::default())
        .init();

    LogGuard { _guards: guards }
}
