//! Host-side logger bridge exported through `UniFFI`.

use std::sync::{Arc, OnceLock};

use sqlshim_db::logging::{self, ENGINE_LOG_TARGET};

/// Trait representing a logger that can log messages at various levels.
///
/// Implemented by the host application to receive log messages, including
/// the `SQLite` engine's own diagnostics once
/// [`forward_engine_log_to_logger`] has been called. It is exported via
/// `UniFFI` for use in foreign languages.
///
/// # Examples
///
/// ```rust
/// use sqlshim::logger::{LogLevel, Logger};
///
/// struct MyLogger;
///
/// impl Logger for MyLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         println!("[{:?}] {}", level, message);
///     }
/// }
/// ```
///
/// ## Swift
///
/// ```swift
/// final class SqlShimLoggerBridge: SqlShim.Logger {
///     static let shared = SqlShimLoggerBridge()
///
///     func log(level: SqlShim.LogLevel, message: String) {
///         print("[\(level)] \(message)")
///     }
/// }
///
/// SqlShim.setLogger(logger: SqlShimLoggerBridge.shared) // once per process
/// SqlShim.forwardEngineLogToLogger()
/// ```
#[uniffi::export(with_foreign)]
pub trait Logger: Sync + Send {
    /// Logs a message at the specified log level.
    fn log(&self, level: LogLevel, message: String);
}

/// Enumeration of possible log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum LogLevel {
    /// Designates very low priority, often extremely detailed messages.
    Trace,
    /// Designates lower priority debugging information.
    Debug,
    /// Designates informational messages that highlight the progress of the application.
    Info,
    /// Designates potentially harmful situations.
    Warn,
    /// Designates error events that might still allow the application to continue running.
    Error,
}

/// Forwards `log` records to the user-provided [`Logger`].
struct ForeignLogger;

impl log::Log for ForeignLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        forwards(metadata.level(), metadata.target())
    }

    fn log(&self, record: &log::Record<'_>) {
        if !forwards(record.level(), record.target()) {
            return;
        }

        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(log_level(record.level()), record.args().to_string());
        } else {
            eprintln!("Logger not set: {}", record.args());
        }
    }

    fn flush(&self) {}
}

/// Debug and trace records are only forwarded from this library and from the
/// engine itself; everything at info and above always is.
fn forwards(level: log::Level, target: &str) -> bool {
    let is_debug_or_trace = level == log::Level::Debug || level == log::Level::Trace;
    !is_debug_or_trace || target == ENGINE_LOG_TARGET || target.starts_with("sqlshim")
}

/// Converts a `log::Level` to a `LogLevel`.
const fn log_level(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warn,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug => LogLevel::Debug,
        log::Level::Trace => LogLevel::Trace,
    }
}

/// The logger provided by the host. Set once.
static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Sets the global logger.
///
/// Installs [`ForeignLogger`] as the `log` backend. Should be called once,
/// before any logging occurs; later calls keep the first logger.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        eprintln!("Logger already set");
    }

    if let Err(e) = init_logger() {
        eprintln!("Failed to set logger: {e}");
    }
}

/// Routes the `SQLite` engine's diagnostics to the logger set with
/// [`set_logger`].
///
/// Replaces any sink registered with `registerErrorLogCallback`. Like that
/// call, a registration the engine refuses is ignored.
#[uniffi::export]
pub fn forward_engine_log_to_logger() {
    logging::forward_engine_log();
}

fn init_logger() -> Result<(), log::SetLoggerError> {
    static LOGGER: ForeignLogger = ForeignLogger;
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(log::Level::Debug, "sqlite", true ; "engine debug")]
    #[test_case(log::Level::Trace, "sqlshim_db::dialect", true ; "own trace")]
    #[test_case(log::Level::Debug, "hyper::client", false ; "foreign debug")]
    #[test_case(log::Level::Info, "hyper::client", true ; "foreign info")]
    #[test_case(log::Level::Error, "sqlite", true ; "engine error")]
    fn test_forwards(level: log::Level, target: &str, expected: bool) {
        assert_eq!(forwards(level, target), expected);
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(log_level(log::Level::Error), LogLevel::Error);
        assert_eq!(log_level(log::Level::Warn), LogLevel::Warn);
        assert_eq!(log_level(log::Level::Trace), LogLevel::Trace);
    }
}
