//! Engine-wide configuration: the global error-log sink.
//!
//! `sqlite3_config` is variadic, which foreign callers such as Swift cannot
//! invoke. The functions here fix its arity for the one verb this crate
//! needs, `SQLITE_CONFIG_LOG`.
//!
//! The engine keeps a single sink for the whole process. Registering replaces
//! the previous sink. Engines older than [`LOG_ANYTIME_MIN_VERSION`] only
//! accept the call while they are not initialized, i.e. before the first
//! connection is opened. The shim performs no locking; callers serialize
//! registration themselves.

use std::os::raw::c_int;
use std::ptr;

use super::error::{DbError, DbResult};
use super::ffi::{self, ErrorLogCallback};

/// First engine version (3.42.0) that accepts `SQLITE_CONFIG_LOG` after
/// initialization.
pub const LOG_ANYTIME_MIN_VERSION: i32 = 3_042_000;

/// Installs `callback` as the process-wide engine log sink.
///
/// `None` removes the current sink. The context pointer handed to the
/// callback is always null. If the engine rejects the configuration (for
/// instance an older engine that is already initialized) the status is
/// discarded; use [`try_register_error_log_callback`] to observe it.
pub fn register_error_log_callback(callback: Option<ErrorLogCallback>) {
    if let Err(e) = try_register_error_log_callback(callback) {
        log::debug!("ignoring rejected error log registration: {e}");
    }
}

/// Like [`register_error_log_callback`] but reports the engine status.
///
/// # Errors
///
/// Returns `SQLITE_MISUSE` when an engine older than
/// [`LOG_ANYTIME_MIN_VERSION`] is already initialized, or whatever other
/// status `sqlite3_config` produced.
pub fn try_register_error_log_callback(callback: Option<ErrorLogCallback>) -> DbResult<()> {
    status(
        ffi::config_log(callback, ptr::null_mut()),
        "sqlite3_config(SQLITE_CONFIG_LOG) rejected",
    )
}

/// Sends `message` with result `code` through the engine's log sink.
///
/// A no-op when no sink is registered.
pub fn emit_log_event(code: i32, message: &str) {
    ffi::log(code, message);
}

/// Version of the linked engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineVersion {
    /// `sqlite3_libversion_number()`, e.g. `3046000` for 3.46.0.
    pub number: i32,
    /// `sqlite3_libversion()`, e.g. `"3.46.0"`.
    pub text: String,
}

/// Queries the version of the engine this process is linked against.
#[must_use]
pub fn engine_version() -> EngineVersion {
    EngineVersion {
        number: ffi::libversion_number(),
        text: ffi::libversion(),
    }
}

pub(crate) fn status(rc: c_int, context: &str) -> DbResult<()> {
    if rc == ffi::SQLITE_OK {
        Ok(())
    } else {
        Err(DbError::new(rc, format!("{context} (status {rc})")))
    }
}
