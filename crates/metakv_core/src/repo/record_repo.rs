//! Record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Expose one storage call per data verb: upsert, get, delete, list, find.
//! - Own the exclusive session handle for the lifetime of the store.
//!
//! # Invariants
//! - Write paths call `validate_key` before SQL mutations.
//! - Listing and pattern search return rows ordered by key ascending.
//! - Patterns go to SQLite `LIKE` untouched: `%` and `_` are wildcards and
//!   nothing is escaped.

use crate::db::{DbError, TABLE_NAME};
use crate::model::record::{validate_key, Record, RecordValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REQUIRED_COLUMNS: [&str; 2] = ["key", "value"];

const UPSERT_SQL: &str = "INSERT INTO metadata (\"key\", \"value\") VALUES (?1, ?2)
     ON CONFLICT(\"key\") DO UPDATE SET \"value\" = excluded.\"value\";";
const GET_SQL: &str = "SELECT \"value\" FROM metadata WHERE \"key\" = ?1;";
const DELETE_SQL: &str = "DELETE FROM metadata WHERE \"key\" = ?1;";
const LIST_SQL: &str = "SELECT \"key\", \"value\" FROM metadata ORDER BY \"key\" ASC;";
const FIND_SQL: &str =
    "SELECT \"key\", \"value\" FROM metadata WHERE \"key\" LIKE ?1 ORDER BY \"key\" ASC;";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by a record store call.
#[derive(Debug)]
pub enum StoreError {
    Validation(RecordValidationError),
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl StoreError {
    /// Stable identifier for log lines; unlike `Display`, never carries user data.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "record_invalid",
            Self::Db(_) => "db_failed",
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => {
                "schema_incomplete"
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::from(value))
    }
}

/// Capability contract the storage engine needs from a backend session.
pub trait RecordStore {
    /// Inserts `key` or replaces its value when it already exists.
    fn upsert(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Returns the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Removes `key` and returns the number of rows removed (0 or 1).
    fn delete(&mut self, key: &str) -> StoreResult<usize>;
    /// Returns every record ordered by key.
    fn list_all(&self) -> StoreResult<Vec<Record>>;
    /// Returns records whose key matches the backend pattern, ordered by key.
    fn find_matching(&self, pattern: &str) -> StoreResult<Vec<Record>>;
}

/// SQLite-backed record store owning its connection.
///
/// Dropping the store closes the connection.
pub struct SqliteRecordStore {
    conn: Connection,
}

impl SqliteRecordStore {
    /// Wraps a connection after checking the `metadata` table shape.
    ///
    /// # Errors
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the table or
    ///   one of its two columns is absent.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        let columns = table_columns(&conn, TABLE_NAME)?;
        if columns.is_empty() {
            return Err(StoreError::MissingRequiredTable(TABLE_NAME));
        }
        for column in REQUIRED_COLUMNS {
            if !columns.iter().any(|name| name == column) {
                return Err(StoreError::MissingRequiredColumn {
                    table: TABLE_NAME,
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl RecordStore for SqliteRecordStore {
    fn upsert(&mut self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.conn.execute(UPSERT_SQL, params![key, value])?;
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut stmt = self.conn.prepare_cached(GET_SQL)?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }

        Ok(None)
    }

    fn delete(&mut self, key: &str) -> StoreResult<usize> {
        let removed = self.conn.execute(DELETE_SQL, [key])?;
        Ok(removed)
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        let mut stmt = self.conn.prepare_cached(LIST_SQL)?;
        let records = stmt
            .query_map([], parse_record_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn find_matching(&self, pattern: &str) -> StoreResult<Vec<Record>> {
        let mut stmt = self.conn.prepare_cached(FIND_SQL)?;
        let records = stmt
            .query_map([pattern], parse_record_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}

fn parse_record_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
}

fn table_columns(conn: &Connection, table: &str) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}
