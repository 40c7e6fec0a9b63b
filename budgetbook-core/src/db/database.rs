//! Database handle with per-call connections.
//!
//! Every store operation opens its own connection through
//! [`Database::with_connection`], runs one statement, and releases the
//! connection before returning. SQLite autocommits each statement.

use crate::config::Config;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, Row};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Location of the budgets/expenses store plus connection settings.
///
/// Cloning is cheap: no connection is held between calls.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Database {
    /// Open or create a database at the given path
    ///
    /// Opens one connection up front so an unreachable database is reported
    /// at startup rather than on the first store call.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Self {
            path: path.to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        };

        db.with_connection(|conn| {
            conn.execute_batch(
                "
                PRAGMA journal_mode = WAL;
                PRAGMA synchronous = NORMAL;
                ",
            )?;
            Ok(())
        })?;

        tracing::debug!(path = %db.path.display(), "Database reachable");
        Ok(db)
    }

    /// Open the database named by the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let db = Self::open(&config.resolved_database_path())?;
        Ok(db.with_busy_timeout(config.database.busy_timeout()))
    }

    /// Set how long each connection waits on a locked database.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        self.with_connection(|conn| super::schema::run_migrations(conn))
    }

    /// Run `f` against a freshly opened connection.
    ///
    /// The connection is released on every exit path: closed explicitly after
    /// `f` returns, or dropped during unwinding.
    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;

        let result = f(&conn);

        if let Err((_, e)) = conn.close() {
            tracing::warn!(error = %e, path = %self.path.display(), "Failed to close connection");
        }

        result
    }
}

/// True when `err` is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

/// Map a failed write on a budget to `DuplicateCategory` when the unique
/// index on `category` rejected it.
pub(crate) fn classify_category_conflict(err: rusqlite::Error, category: &str) -> Error {
    if is_unique_violation(&err) {
        Error::DuplicateCategory(category.to_string())
    } else {
        Error::Storage(err)
    }
}

/// Read a DECIMAL(10,2) text column.
pub(crate) fn decimal_column(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a YYYY-MM-DD text column.
pub(crate) fn date_column(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    NaiveDate::parse_from_str(&text, crate::validate::DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
