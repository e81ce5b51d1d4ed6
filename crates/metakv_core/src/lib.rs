//! Core logic for the metadata manager.
//! Parses REPL commands and executes them against a two-column SQLite table.

pub mod command;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use command::{Command, Verb};
pub use logging::{default_log_level, init_logging};
pub use model::record::{Record, RecordValidationError};
pub use repo::record_repo::{RecordStore, SqliteRecordStore, StoreError, StoreResult};
pub use service::storage_engine::{Outcome, Payload, StorageEngine};
