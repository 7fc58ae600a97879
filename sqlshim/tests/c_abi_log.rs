//! `registerErrorLogCallback` as seen by a foreign caller.
//!
//! The engine log sink is process-wide, so this file holds a single test.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_void};
use std::sync::Mutex;

use sqlshim as _;
use sqlshim_db::config::{self, LOG_ANYTIME_MIN_VERSION};
use sqlshim_db::{Connection, ErrorLogCallback};

extern "C" {
    fn registerErrorLogCallback(callback: Option<ErrorLogCallback>);
}

type Events = Mutex<Vec<(i32, String)>>;

static REPLACED: Events = Mutex::new(Vec::new());
static ACTIVE: Events = Mutex::new(Vec::new());

fn record(events: &Events, code: c_int, message: *const c_char) {
    let message = unsafe { CStr::from_ptr(message) }
        .to_string_lossy()
        .into_owned();
    events.lock().expect("events lock").push((code, message));
}

unsafe extern "C" fn replaced_sink(_context: *mut c_void, code: c_int, message: *const c_char) {
    record(&REPLACED, code, message);
}

unsafe extern "C" fn active_sink(_context: *mut c_void, code: c_int, message: *const c_char) {
    record(&ACTIVE, code, message);
}

#[test]
fn test_registered_callback_sees_failed_query() {
    unsafe {
        registerErrorLogCallback(Some(replaced_sink));
        registerErrorLogCallback(Some(active_sink));
    }

    let conn = Connection::open_in_memory().expect("open in-memory db");
    assert!(conn.prepare("SELECT * FROM x").is_err());

    assert!(REPLACED.lock().expect("events lock").is_empty());
    let events = ACTIVE.lock().expect("events lock").clone();
    let matching: Vec<_> = events
        .iter()
        .filter(|(code, message)| *code == 1 && message.starts_with("no such table: x"))
        .collect();
    assert_eq!(matching.len(), 1, "{events:?}");

    // Unregistering after initialization only sticks on newer engines.
    unsafe { registerErrorLogCallback(None) };
    config::emit_log_event(1, "after unregister");
    let after = ACTIVE.lock().expect("events lock").len();
    if config::engine_version().number >= LOG_ANYTIME_MIN_VERSION {
        assert_eq!(after, events.len());
    } else {
        assert_eq!(after, events.len() + 1);
    }
}
