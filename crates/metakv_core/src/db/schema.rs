//! Shape of the one table the store persists into.

use super::{DbError, DbResult, DbStage};
use rusqlite::Connection;

pub const TABLE_NAME: &str = "metadata";

const CREATE_TABLE_SQL: &str = include_str!("schema.sql");

/// Creates the `metadata` table unless it already exists.
///
/// An existing table is adopted as-is; its columns are checked later by
/// `SqliteRecordStore::try_new`.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_TABLE_SQL)
        .map_err(|err| DbError::new(DbStage::Schema, err))
}
