//! SQLite session bootstrap for the metadata store.
//!
//! # Responsibility
//! - Open the single session the storage engine runs against.
//! - Make sure the `metadata` table exists before any record is touched.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_schema, TABLE_NAME};

pub type DbResult<T> = Result<T, DbError>;

/// Point in the session lifecycle at which SQLite reported a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbStage {
    Connect,
    Configure,
    Schema,
    Statement,
}

/// SQLite failure tagged with the stage it happened in.
#[derive(Debug)]
pub struct DbError {
    stage: DbStage,
    source: rusqlite::Error,
}

impl DbError {
    pub fn new(stage: DbStage, source: rusqlite::Error) -> Self {
        Self { stage, source }
    }

    pub fn stage(&self) -> DbStage {
        self.stage
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let source = &self.source;
        match self.stage {
            DbStage::Connect => write!(f, "cannot open database: {source}"),
            DbStage::Configure => write!(f, "cannot configure database session: {source}"),
            DbStage::Schema => write!(f, "cannot create table `{TABLE_NAME}`: {source}"),
            DbStage::Statement => write!(f, "{source}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Failures of ordinary statements once the session is open.
impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::new(DbStage::Statement, value)
    }
}
