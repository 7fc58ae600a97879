//! Per-connection toggle for double-quoted string literals (DQS).
//!
//! Historically `SQLite` accepted `"text"` as a string literal whenever no
//! column of that name exists. `SQLITE_DBCONFIG_DQS_DDL` and
//! `SQLITE_DBCONFIG_DQS_DML` switch that quirk off (strict identifiers) or on,
//! for schema statements and data statements respectively. Both verbs go
//! through the variadic `sqlite3_db_config`, so this module fixes the arity.
//!
//! Engines older than 3.29.0 do not know the verbs. The toggles then fall back
//! to [`DqsStrategy::NoOp`], chosen once from the linked engine's version.

use std::os::raw::c_int;
use std::sync::OnceLock;

use super::config;
use super::ffi::{self, DbHandle};

/// First engine version (3.29.0) with the DQS configuration verbs.
pub const DQS_MIN_VERSION: i32 = 3_029_000;

/// Per-connection DQS settings as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DqsState {
    /// Double-quoted literals accepted in DDL (`CREATE`, `ALTER`, ...).
    pub ddl: bool,
    /// Double-quoted literals accepted in DML (`SELECT`, `INSERT`, ...).
    pub dml: bool,
}

/// How DQS toggles are carried out on the linked engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DqsStrategy {
    /// The engine supports the verbs; toggles call `sqlite3_db_config`.
    Configure,
    /// The engine predates the verbs; toggles leave the connection alone.
    NoOp,
}

impl DqsStrategy {
    /// Selects the strategy for an engine reporting `version`
    /// (`sqlite3_libversion_number` format).
    #[must_use]
    pub const fn for_version(version: i32) -> Self {
        if version >= DQS_MIN_VERSION {
            Self::Configure
        } else {
            Self::NoOp
        }
    }

    /// Strategy for the linked engine. Queried once per process.
    #[must_use]
    pub fn detect() -> Self {
        static STRATEGY: OnceLock<DqsStrategy> = OnceLock::new();
        *STRATEGY.get_or_init(|| {
            let version = ffi::libversion_number();
            let strategy = Self::for_version(version);
            log::debug!("sqlite {version}: using {strategy:?} for DQS toggles");
            strategy
        })
    }

    /// Sets the DQS quirk on `db` for both DDL and DML.
    ///
    /// Engine status codes are discarded.
    pub fn apply(self, db: DbHandle<'_>, enabled: bool) {
        match self {
            Self::Configure => {
                let value = c_int::from(enabled);
                for op in [ffi::SQLITE_DBCONFIG_DQS_DDL, ffi::SQLITE_DBCONFIG_DQS_DML] {
                    let (rc, _) = db.db_config_flag(op, value);
                    if let Err(e) = config::status(rc, "sqlite3_db_config(DQS) rejected") {
                        log::debug!("ignoring DQS toggle failure on {db:?}: {e}");
                    }
                }
            }
            Self::NoOp => {}
        }
    }

    /// Reads the DQS settings of `db`. `None` under [`Self::NoOp`] or when the
    /// engine refuses the query.
    #[must_use]
    pub fn read(self, db: DbHandle<'_>) -> Option<DqsState> {
        match self {
            Self::Configure => {
                let (ddl_rc, ddl) = db.db_config_flag(ffi::SQLITE_DBCONFIG_DQS_DDL, -1);
                let (dml_rc, dml) = db.db_config_flag(ffi::SQLITE_DBCONFIG_DQS_DML, -1);
                (ddl_rc == ffi::SQLITE_OK && dml_rc == ffi::SQLITE_OK).then_some(DqsState {
                    ddl: ddl != 0,
                    dml: dml != 0,
                })
            }
            Self::NoOp => None,
        }
    }
}

/// Makes `db` treat double-quoted tokens strictly as identifiers, in both DDL
/// and DML. A no-op on engines older than [`DQS_MIN_VERSION`].
pub fn disable_double_quoted_string_literals(db: DbHandle<'_>) {
    DqsStrategy::detect().apply(db, false);
}

/// Lets `db` accept double-quoted string literals again, in both DDL and DML.
/// A no-op on engines older than [`DQS_MIN_VERSION`].
pub fn enable_double_quoted_string_literals(db: DbHandle<'_>) {
    DqsStrategy::detect().apply(db, true);
}

/// Current DQS settings of `db`, or `None` if the engine lacks the verbs.
#[must_use]
pub fn double_quoted_string_literals(db: DbHandle<'_>) -> Option<DqsState> {
    DqsStrategy::detect().read(db)
}
