//! Fixed-arity C entry points for `SQLite`'s variadic configuration calls.
//!
//! Swift cannot call C variadics such as `sqlite3_config` and
//! `sqlite3_db_config`. This library exports one fixed-signature symbol per
//! configuration the host application needs, under the names declared in
//! `include/sqlshim.h`:
//!
//! ```c
//! void registerErrorLogCallback(errorLogCallback callback);
//! void disableDoubleQuotedStringLiterals(sqlite3 *db);
//! void enableDoubleQuotedStringLiterals(sqlite3 *db);
//! ```
//!
//! None of them report failure. A configuration the engine refuses, or that an
//! old engine does not know, leaves the process unchanged.
//!
//! The [`logger`] module additionally exposes, through `UniFFI`, a way for the
//! host to receive the engine's diagnostics via its own logger.

use std::os::raw::c_void;

use sqlshim_db::{config, dialect, DbHandle, ErrorLogCallback};

pub mod logger;

/// Installs `callback` as the process-wide `SQLite` error-log sink.
///
/// Replaces any previous sink; `NULL` removes it. The callback receives a null
/// context pointer, the engine result code and the message. A registration
/// the engine refuses is ignored.
#[export_name = "registerErrorLogCallback"]
pub extern "C" fn register_error_log_callback(callback: Option<ErrorLogCallback>) {
    config::register_error_log_callback(callback);
}

/// Makes the connection `db` treat double-quoted tokens strictly as
/// identifiers, for both schema and data statements.
///
/// A no-op when `db` is null or the engine predates 3.29.0.
///
/// # Safety
///
/// `db` must be null or an open `sqlite3*` not used concurrently by another
/// thread during the call.
#[export_name = "disableDoubleQuotedStringLiterals"]
pub unsafe extern "C" fn disable_double_quoted_string_literals(db: *mut c_void) {
    if let Some(db) = unsafe { DbHandle::from_raw(db) } {
        dialect::disable_double_quoted_string_literals(db);
    }
}

/// Lets the connection `db` accept double-quoted string literals, for both
/// schema and data statements.
///
/// A no-op when `db` is null or the engine predates 3.29.0.
///
/// # Safety
///
/// `db` must be null or an open `sqlite3*` not used concurrently by another
/// thread during the call.
#[export_name = "enableDoubleQuotedStringLiterals"]
pub unsafe extern "C" fn enable_double_quoted_string_literals(db: *mut c_void) {
    if let Some(db) = unsafe { DbHandle::from_raw(db) } {
        dialect::enable_double_quoted_string_literals(db);
    }
}

uniffi::setup_scaffolding!("sqlshim");
