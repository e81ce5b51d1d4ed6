//! Connection provider for the metadata store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure pragmas the key/value semantics depend on.
//! - Create the `metadata` table before returning a usable connection.
//!
//! # Invariants
//! - Returned connections match `LIKE` patterns case-sensitively.

use super::schema::ensure_schema;
use super::{DbError, DbResult, DbStage};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens (creating if needed) a SQLite database file.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a private in-memory SQLite database.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = connect()
        .map_err(|err| DbError::new(DbStage::Connect, err))
        .and_then(|conn| {
            configure_session(&conn)?;
            ensure_schema(&conn)?;
            Ok(conn)
        });

    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} stage={:?} error={err}",
            err.stage()
        ),
    }
    result
}

/// `case_sensitive_like` is deprecated upstream but still honored by the
/// bundled SQLite; it is required so `find` keeps DB2-style case-sensitive
/// `LIKE` matching, consistent with case-sensitive key uniqueness.
fn configure_session(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA case_sensitive_like = ON;")
        .and_then(|()| conn.busy_timeout(Duration::from_secs(5)))
        .map_err(|err| DbError::new(DbStage::Configure, err))
}
