//! Log sink registration after the engine is initialized.
//!
//! Newer engines accept the registration at any time; older ones refuse it
//! with `SQLITE_MISUSE`, and the plain variant must swallow that.

use std::os::raw::{c_char, c_int, c_void};
use std::sync::atomic::{AtomicUsize, Ordering};

use sqlshim_db::config::{self, LOG_ANYTIME_MIN_VERSION};
use sqlshim_db::Connection;

const SQLITE_MISUSE: i32 = 21;

static CALLS: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn counting_sink(_context: *mut c_void, code: c_int, _message: *const c_char) {
    if code == 1 {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_registration_after_open_follows_engine_version() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    let result = config::try_register_error_log_callback(Some(counting_sink));
    // The swallowing variant must return normally either way.
    config::register_error_log_callback(Some(counting_sink));

    assert!(conn.prepare("SELECT * FROM x").is_err());

    if config::engine_version().number >= LOG_ANYTIME_MIN_VERSION {
        result.expect("late registration accepted");
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    } else {
        let err = result.expect_err("engine already initialized");
        assert_eq!(err.code.primary(), SQLITE_MISUSE);
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }
}
