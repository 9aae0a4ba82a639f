// Logging setup: console output plus an optional daily-rotated log file

use crate::config::LoggingConfig;
use crate::error::{TradingError, TradingResult};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Files are named `trading_bot.YYYY-MM-DD.log`
pub const LOG_FILE_PREFIX: &str = "trading_bot";
pub const LOG_FILE_SUFFIX: &str = "log";

/// Keeps the file writer alive. Dropping it flushes buffered lines, so
/// hold it until the process exits.
#[must_use]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Appender that starts a new file in `directory` at each midnight
pub fn file_appender(directory: &str) -> TradingResult<RollingFileAppender> {
    fs::create_dir_all(directory)
        .map_err(|e| TradingError::DirectoryCreate(format!("{}: {}", directory, e)))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(directory)
        .map_err(|e| TradingError::FileWrite(format!("{}: {}", directory, e)))
}

/// DEBUG and above from this crate only; dependency chatter stays out of the file
pub fn file_filter() -> EnvFilter {
    EnvFilter::new("trading_bot=debug")
}

/// Install the global subscriber.
///
/// The console follows `RUST_LOG` when set, otherwise the configured level
/// (`debug` with `--verbose`).
pub fn init(config: &LoggingConfig, verbose: bool) -> TradingResult<LoggingGuard> {
    let console_level = if verbose { "debug" } else { config.level.as_str() };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_level));

    let console = fmt::layer().with_target(false).with_filter(console_filter);

    let (file, file_guard) = if config.log_to_file {
        let (writer, guard) = tracing_appender::non_blocking(file_appender(&config.log_directory)?);
        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(file_filter());
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| TradingError::Internal(format!("logging already initialised: {}", e)))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn log_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[test]
    fn test_file_appender_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("logs");

        file_appender(&dir.to_string_lossy()).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_file_keeps_only_crate_events() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_string_lossy().to_string();

        let (writer, guard) = tracing_appender::non_blocking(file_appender(&dir).unwrap());
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(file_filter()),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "trading_bot::client", "signed request sent");
            tracing::debug!(target: "hyper::proto", "connection reused");
        });
        drop(guard);

        let files = log_files(temp.path());
        assert_eq!(files.len(), 1);

        let name = files[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("trading_bot."));
        assert!(name.ends_with(".log"));
        assert_eq!(name.len(), "trading_bot.YYYY-MM-DD.log".len());

        let contents = fs::read_to_string(&files[0]).unwrap();
        assert!(contents.contains("signed request sent"));
        assert!(!contents.contains("connection reused"));
    }
}
