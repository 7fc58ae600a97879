//! Minimal safe `SQLite` wrapper with fixed-arity configuration adapters.
//!
//! The engine's configuration entry points `sqlite3_config` and
//! `sqlite3_db_config` are C variadics, which Swift (among others) cannot
//! call. This crate pins the two configurations the host application needs to
//! fixed signatures:
//!
//! * [`config::register_error_log_callback`] -- the process-wide log sink.
//! * [`dialect::disable_double_quoted_string_literals`] /
//!   [`dialect::enable_double_quoted_string_literals`] -- the per-connection
//!   double-quoted string literal quirk, gated on the engine version.
//!
//! The raw symbols come from `libsqlite3-sys`. A small [`Connection`] /
//! [`Statement`] wrapper is included to open databases and drive the engine
//! from Rust. The `ffi` module is the **only** file that contains `unsafe`
//! code or C types.

mod ffi;

pub mod config;
mod connection;
pub mod dialect;
pub mod error;
pub mod logging;
mod statement;

pub use connection::Connection;
pub use error::{DbError, DbErrorCode, DbResult};
pub use ffi::{DbHandle, ErrorLogCallback};
pub use statement::{Statement, StepResult};
