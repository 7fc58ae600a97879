//! Exercises the exported C symbols the way a foreign caller links them.

use std::os::raw::c_void;
use std::ptr;

use sqlshim_db::dialect::{self, DqsState};
use sqlshim_db::{Connection, DbResult};

extern "C" {
    fn disableDoubleQuotedStringLiterals(db: *mut c_void);
    fn enableDoubleQuotedStringLiterals(db: *mut c_void);
}

fn select_double_quoted(conn: &Connection) -> DbResult<String> {
    conn.query_row(r#"SELECT "abc""#, |stmt| Ok(stmt.column_text(0)))
}

#[test]
fn test_toggle_through_exported_symbols() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    let raw = conn.handle().as_ptr();

    unsafe { disableDoubleQuotedStringLiterals(raw) };
    let err = select_double_quoted(&conn).expect_err("strict identifiers");
    // e.g. `no such column: "abc" - should this be a string literal in single-quotes?`
    assert_eq!(err.code.primary(), 1, "{err}");
    assert!(err.message.starts_with("no such column"), "{err}");
    assert!(err.message.contains("abc"), "{err}");
    assert_eq!(
        dialect::double_quoted_string_literals(conn.handle()),
        Some(DqsState {
            ddl: false,
            dml: false
        })
    );

    unsafe { enableDoubleQuotedStringLiterals(raw) };
    assert_eq!(select_double_quoted(&conn).expect("literal accepted"), "abc");
}

#[test]
fn test_toggle_only_touches_given_connection() {
    let strict = Connection::open_in_memory().expect("open strict");
    let lenient = Connection::open_in_memory().expect("open lenient");

    unsafe {
        sqlshim::enable_double_quoted_string_literals(lenient.handle().as_ptr());
        sqlshim::disable_double_quoted_string_literals(strict.handle().as_ptr());
    }

    let err = select_double_quoted(&strict).expect_err("strict");
    assert!(err.message.starts_with("no such column"), "{err}");
    assert_eq!(select_double_quoted(&lenient).expect("lenient"), "abc");
}

#[test]
fn test_null_handle_is_ignored() {
    unsafe {
        disableDoubleQuotedStringLiterals(ptr::null_mut());
        enableDoubleQuotedStringLiterals(ptr::null_mut());
    }
}
