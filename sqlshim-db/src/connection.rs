//! Safe wrapper around a `SQLite` database connection.
//!
//! This file contains **no `unsafe` code**. All FFI interaction is delegated to
//! [`ffi::RawDb`] which encapsulates the raw pointers and C type conversions.

use std::path::Path;

use super::error::{DbError, DbResult};
use super::ffi::{self, DbHandle, RawDb};
use super::statement::{Statement, StepResult};

/// A `SQLite` database connection.
///
/// Closed when dropped. Not `Sync` -- all access must happen from a single
/// thread at a time.
pub struct Connection {
    db: RawDb,
}

impl Connection {
    /// Opens (or creates) a database at `path`.
    ///
    /// # Errors
    ///
    /// Returns the engine error if the file cannot be opened.
    pub fn open(path: &Path) -> DbResult<Self> {
        let path_str = path.to_string_lossy();
        let db = RawDb::open(
            &path_str,
            ffi::SQLITE_OPEN_READWRITE | ffi::SQLITE_OPEN_CREATE | ffi::SQLITE_OPEN_FULLMUTEX,
        )?;
        log::debug!("opened sqlite database at {path_str}");
        Ok(Self { db })
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns the engine error if the database cannot be created.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::open(Path::new(":memory:"))
    }

    /// Returns the borrowed engine handle of this connection.
    ///
    /// This is what the configuration shim operates on, and what gets handed
    /// to foreign callers expecting a `sqlite3*`.
    #[must_use]
    pub fn handle(&self) -> DbHandle<'_> {
        self.db.handle()
    }

    /// Executes one or more SQL statements separated by semicolons.
    ///
    /// No result rows are returned. Suitable for DDL, PRAGMAs, and
    /// multi-statement scripts.
    ///
    /// # Errors
    ///
    /// Returns the first engine error encountered.
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.db.exec(sql)
    }

    /// Prepares a single SQL statement.
    ///
    /// # Errors
    ///
    /// Returns the parser error, e.g. `no such column` or a syntax error.
    pub fn prepare(&self, sql: &str) -> DbResult<Statement<'_>> {
        let raw_stmt = self.db.prepare(sql)?;
        Ok(Statement::new(raw_stmt))
    }

    /// Prepares and executes a statement, mapping its first result row.
    ///
    /// # Errors
    ///
    /// Returns an error if no row is returned, or the engine or mapper fails.
    pub fn query_row<T>(
        &self,
        sql: &str,
        mapper: impl FnOnce(&Statement<'_>) -> DbResult<T>,
    ) -> DbResult<T> {
        let stmt = self.prepare(sql)?;
        match stmt.step()? {
            StepResult::Row => mapper(&stmt),
            StepResult::Done => Err(DbError::new(ffi::SQLITE_DONE, "query returned no rows")),
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("db", &self.db.handle())
            .finish()
    }
}
