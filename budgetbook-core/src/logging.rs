//! File logging for budgetbook
//!
//! Events go to `$XDG_STATE_HOME/budgetbook/`, one file per day named
//! `budgetbook.log.YYYY-MM-DD`.

use crate::config::{Config, LoggingConfig};
use crate::error::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Prefix of every log file; the appender adds the date suffix.
pub const LOG_FILE_PREFIX: &str = "budgetbook.log";

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.level` when set. At most `config.max_files`
/// daily files are kept.
pub fn init(config: &LoggingConfig) -> crate::error::Result<LoggingGuard> {
    let log_dir = Config::state_dir();
    std::fs::create_dir_all(&log_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .max_log_files(config.max_files.max(1))
        .build(&log_dir)
        .map_err(|e| Error::Config(format!("failed to create log appender: {e}")))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter(&config.level))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(log_dir = %log_dir.display(), level = %config.level, "Logging initialized");
    Ok(LoggingGuard { _guard: guard })
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Flushes buffered events when dropped; hold it until the process exits.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}
