//! Bridge from the engine's log sink to the `log` facade.
//!
//! Records are emitted with target [`ENGINE_LOG_TARGET`] and a level derived
//! from the primary result code.

use super::config;
use super::error::DbResult;
use super::ffi;

/// `log` target used for engine diagnostics.
pub const ENGINE_LOG_TARGET: &str = "sqlite";

/// Registers a built-in sink that re-emits engine diagnostics through `log`.
///
/// Same rules as [`config::register_error_log_callback`]: it replaces any
/// previous sink and a rejection by the engine is silently ignored.
pub fn forward_engine_log() {
    config::register_error_log_callback(Some(ffi::forward_to_log_facade));
}

/// Like [`forward_engine_log`] but reports the engine status.
///
/// # Errors
///
/// Returns the status of a rejected `sqlite3_config` call, see
/// [`config::try_register_error_log_callback`].
pub fn try_forward_engine_log() -> DbResult<()> {
    config::try_register_error_log_callback(Some(ffi::forward_to_log_facade))
}

/// Level for an engine log event with (possibly extended) result `code`.
#[must_use]
pub const fn level_for(code: i32) -> log::Level {
    match code & 0xff {
        ffi::SQLITE_NOTICE => log::Level::Info,
        ffi::SQLITE_WARNING => log::Level::Warn,
        // Schema changes force statement re-preparation; routine noise.
        ffi::SQLITE_SCHEMA => log::Level::Debug,
        _ => log::Level::Error,
    }
}

pub(crate) fn emit(code: i32, message: &str) {
    log::log!(target: ENGINE_LOG_TARGET, level_for(code), "({code}) {message}");
}
