//! Raw FFI bindings to `SQLite`.
//!
//! The symbols come from `libsqlite3-sys`, which either compiles its bundled
//! amalgamation or links the system library (see the `bundled` feature).
//!
//! This is the **only** file in the crate that contains `unsafe` code or C
//! types. The rest of the crate talks to the engine through [`RawDb`],
//! [`RawStmt`], [`DbHandle`] and the engine-wide functions at the bottom.

use std::ffi::{CStr, CString};
use std::fmt;
use std::marker::PhantomData;
use std::os::raw::{c_char, c_int, c_void};
use std::ptr::{self, NonNull};

use libsqlite3_sys as sys;

use super::error::{DbError, DbResult};

// ── SQLite constants ────────────────────────────────────────────────────

pub const SQLITE_OK: c_int = 0;
pub const SQLITE_ERROR: c_int = 1;
pub const SQLITE_SCHEMA: c_int = 17;
pub const SQLITE_MISUSE: c_int = 21;
pub const SQLITE_NOTICE: c_int = 27;
pub const SQLITE_WARNING: c_int = 28;
pub const SQLITE_ROW: c_int = 100;
pub const SQLITE_DONE: c_int = 101;

// Open flags
pub const SQLITE_OPEN_READWRITE: c_int = 0x0000_0002;
pub const SQLITE_OPEN_CREATE: c_int = 0x0000_0004;
pub const SQLITE_OPEN_FULLMUTEX: c_int = 0x0001_0000;

// sqlite3_config / sqlite3_db_config verbs
pub const SQLITE_CONFIG_LOG: c_int = 16;
pub const SQLITE_DBCONFIG_DQS_DML: c_int = 1013;
pub const SQLITE_DBCONFIG_DQS_DDL: c_int = 1014;

/// Signature of the engine's global error-log sink.
///
/// Arguments are the opaque context pointer supplied at registration, the
/// (possibly extended) result code, and a NUL-terminated message that is only
/// valid for the duration of the call.
pub type ErrorLogCallback =
    unsafe extern "C" fn(context: *mut c_void, code: c_int, message: *const c_char);

// ── Borrowed handle ─────────────────────────────────────────────────────

/// A borrowed, non-null `sqlite3*` handle.
///
/// Never closes the connection. Obtained from
/// [`Connection::handle`](crate::Connection::handle) or, for handles received
/// over FFI, from [`DbHandle::from_raw`].
#[derive(Clone, Copy)]
pub struct DbHandle<'conn> {
    ptr: NonNull<sys::sqlite3>,
    _conn: PhantomData<&'conn ()>,
}

impl<'conn> DbHandle<'conn> {
    /// Wraps a raw `sqlite3*`. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to an open connection that stays open, and
    /// is not used concurrently from another thread, for `'conn`.
    #[must_use]
    pub unsafe fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr.cast::<sys::sqlite3>()).map(|ptr| Self {
            ptr,
            _conn: PhantomData,
        })
    }

    /// Returns the raw `sqlite3*` as an opaque pointer.
    #[must_use]
    pub fn as_ptr(self) -> *mut c_void {
        self.ptr.as_ptr().cast()
    }

    /// Calls `sqlite3_db_config(db, op, value, &out)` for an integer flag verb.
    ///
    /// Returns the engine status and the setting after the call. A negative
    /// `value` leaves the setting unchanged and only reads it.
    pub(crate) fn db_config_flag(self, op: c_int, value: c_int) -> (c_int, c_int) {
        let mut current: c_int = -1;
        let rc = unsafe {
            sys::sqlite3_db_config(
                self.ptr.as_ptr(),
                op,
                value,
                ptr::addr_of_mut!(current),
            )
        };
        (rc, current)
    }

    fn errmsg(self) -> String {
        unsafe { c_str_lossy(sys::sqlite3_errmsg(self.ptr.as_ptr())) }
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

impl fmt::Debug for DbHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DbHandle").field(&self.ptr).finish()
    }
}

// ── Owned connection ────────────────────────────────────────────────────

/// Owned `sqlite3*`, closed on drop.
pub struct RawDb {
    ptr: NonNull<sys::sqlite3>,
}

// The handle is only ever used by one thread at a time: `Connection` is Send
// but not Sync.
unsafe impl Send for RawDb {}

impl RawDb {
    pub fn open(path: &str, flags: c_int) -> DbResult<Self> {
        let c_path = CString::new(path)
            .map_err(|e| DbError::new(SQLITE_ERROR, format!("invalid path: {e}")))?;
        let mut db: *mut sys::sqlite3 = ptr::null_mut();
        let rc = unsafe {
            sys::sqlite3_open_v2(c_path.as_ptr(), &mut db, flags, ptr::null())
        };
        match NonNull::new(db) {
            Some(ptr) if rc == SQLITE_OK => Ok(Self { ptr }),
            Some(ptr) => {
                // The engine hands back a handle even on failure; it carries
                // the message and must still be closed.
                let msg = Self { ptr }.handle().errmsg();
                Err(DbError::new(rc, msg))
            }
            None => Err(DbError::new(rc, format!("sqlite3_open_v2 returned {rc}"))),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DbHandle<'_> {
        DbHandle {
            ptr: self.ptr,
            _conn: PhantomData,
        }
    }

    pub fn exec(&self, sql: &str) -> DbResult<()> {
        let c_sql = CString::new(sql)
            .map_err(|e| DbError::new(SQLITE_ERROR, format!("nul in SQL: {e}")))?;
        let mut errmsg: *mut c_char = ptr::null_mut();
        let rc = unsafe {
            sys::sqlite3_exec(
                self.ptr.as_ptr(),
                c_sql.as_ptr(),
                None,
                ptr::null_mut(),
                &mut errmsg,
            )
        };
        if rc == SQLITE_OK {
            return Ok(());
        }
        let msg = unsafe {
            let msg = c_str_lossy(errmsg);
            sys::sqlite3_free(errmsg.cast());
            msg
        };
        Err(DbError::new(
            rc,
            msg.unwrap_or_else(|| self.handle().errmsg()),
        ))
    }

    pub fn prepare(&self, sql: &str) -> DbResult<RawStmt<'_>> {
        let c_sql = CString::new(sql)
            .map_err(|e| DbError::new(SQLITE_ERROR, format!("nul in SQL: {e}")))?;
        let mut stmt: *mut sys::sqlite3_stmt = ptr::null_mut();
        let rc = unsafe {
            sys::sqlite3_prepare_v2(
                self.ptr.as_ptr(),
                c_sql.as_ptr(),
                -1,
                &mut stmt,
                ptr::null_mut(),
            )
        };
        match NonNull::new(stmt) {
            Some(ptr) if rc == SQLITE_OK => Ok(RawStmt {
                ptr,
                db: self.handle(),
            }),
            // Whitespace or comment-only SQL prepares to a null statement.
            None if rc == SQLITE_OK => {
                Err(DbError::new(SQLITE_MISUSE, "no SQL statement to prepare"))
            }
            _ => Err(DbError::new(rc, self.handle().errmsg())),
        }
    }
}

// Every `RawStmt` borrows its `RawDb`, so all statements are finalized by the
// time the connection is closed.
impl Drop for RawDb {
    fn drop(&mut self) {
        unsafe {
            sys::sqlite3_close(self.ptr.as_ptr());
        }
    }
}

// ── Prepared statement ──────────────────────────────────────────────────

/// Owned `sqlite3_stmt*`, finalized on drop.
pub struct RawStmt<'conn> {
    ptr: NonNull<sys::sqlite3_stmt>,
    db: DbHandle<'conn>,
}

impl RawStmt<'_> {
    /// Steps once, returning `SQLITE_ROW` or `SQLITE_DONE`.
    pub fn step(&self) -> DbResult<c_int> {
        let rc = unsafe { sys::sqlite3_step(self.ptr.as_ptr()) };
        match rc {
            SQLITE_ROW | SQLITE_DONE => Ok(rc),
            _ => Err(DbError::new(rc, self.db.errmsg())),
        }
    }

    pub fn column_text(&self, idx: c_int) -> String {
        unsafe {
            c_str_lossy(sys::sqlite3_column_text(self.ptr.as_ptr(), idx).cast())
        }
        .unwrap_or_default()
    }
}

impl Drop for RawStmt<'_> {
    fn drop(&mut self) {
        unsafe {
            sys::sqlite3_finalize(self.ptr.as_ptr());
        }
    }
}

// ── Engine-wide calls ───────────────────────────────────────────────────

/// `sqlite3_config(SQLITE_CONFIG_LOG, callback, context)`.
///
/// Before 3.42.0 the engine only accepts this outside of `sqlite3_initialize`
/// / `sqlite3_shutdown`; otherwise it returns `SQLITE_MISUSE`.
pub fn config_log(callback: Option<ErrorLogCallback>, context: *mut c_void) -> c_int {
    unsafe {
        match callback {
            Some(callback) => sys::sqlite3_config(SQLITE_CONFIG_LOG, callback, context),
            None => sys::sqlite3_config(
                SQLITE_CONFIG_LOG,
                ptr::null_mut::<c_void>(),
                context,
            ),
        }
    }
}

/// `sqlite3_log(code, "%s", message)`. Interior NULs truncate the message.
pub fn log(code: c_int, message: &str) {
    let message = CString::new(message).unwrap_or_else(|e| {
        let nul = e.nul_position();
        let mut bytes = e.into_vec();
        bytes.truncate(nul);
        CString::new(bytes).unwrap_or_default()
    });
    unsafe {
        sys::sqlite3_log(code, c"%s".as_ptr(), message.as_ptr());
    }
}

/// Engine log sink installed by [`crate::logging::forward_engine_log`].
///
/// Copies the message and hands it to the `log` facade.
pub unsafe extern "C" fn forward_to_log_facade(
    _context: *mut c_void,
    code: c_int,
    message: *const c_char,
) {
    let message = c_str_lossy(message).unwrap_or_default();
    crate::logging::emit(code, &message);
}

#[must_use]
pub fn libversion_number() -> c_int {
    unsafe { sys::sqlite3_libversion_number() }
}

#[must_use]
pub fn libversion() -> String {
    unsafe { c_str_lossy(sys::sqlite3_libversion()) }.unwrap_or_default()
}

/// Copies a borrowed C string, `None` for null.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
pub unsafe fn c_str_lossy(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}
