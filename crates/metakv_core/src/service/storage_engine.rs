//! Storage engine: executes one command against a record store.
//!
//! # Responsibility
//! - Run exactly one storage call per data command.
//! - Translate every store failure into [`Outcome::Error`].
//!
//! # Invariants
//! - No store error escapes `execute`; the caller always gets an `Outcome`.
//! - Failures are never retried.
//! - Missing keys on `get`/`del` are `Ok(Payload::None)`, not errors.
//! - Non-storage commands (`help`, `exit`, invalid input) never reach the store.

use crate::command::Command;
use crate::model::record::Record;
use crate::repo::record_repo::{RecordStore, StoreResult};
use log::{debug, warn};
use std::time::Instant;

/// Successful result body of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Nothing to show: writes, deletes, and lookups of absent keys.
    None,
    /// Value returned by `get`.
    Value(String),
    /// Ordered rows returned by `list` and `find`.
    Records(Vec<Record>),
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ok(Payload),
    Error(String),
}

/// Executes commands against an exclusively owned record store.
pub struct StorageEngine<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> StorageEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Executes `command` and reports the outcome.
    ///
    /// # Contract
    /// - `set` upserts, `get` returns the value or `Payload::None`.
    /// - `del` of an absent key is a silent no-op returning `Payload::None`.
    /// - `list` and `find` return records ordered by key, possibly empty.
    /// - `help`, `exit` and invalid commands are rejected without a store call.
    pub fn execute(&mut self, command: &Command) -> Outcome {
        let verb = command.verb().map_or("invalid", |verb| verb.name());
        let started_at = Instant::now();
        let mut rows_removed = None;

        let result: StoreResult<Payload> = match command {
            Command::Set { key, value } => self
                .store
                .upsert(key, value)
                .map(|()| Payload::None),
            Command::Get { key } => self
                .store
                .get(key)
                .map(|value| value.map_or(Payload::None, Payload::Value)),
            Command::Delete { key } => self.store.delete(key).map(|removed| {
                rows_removed = Some(removed);
                Payload::None
            }),
            Command::List => self.store.list_all().map(Payload::Records),
            Command::Find { pattern } => {
                self.store.find_matching(pattern).map(Payload::Records)
            }
            Command::Help | Command::Exit | Command::Invalid { .. } => {
                warn!(
                    "event=command_execute module=engine status=rejected verb={verb} reason=not_a_storage_command"
                );
                return Outcome::Error(format!("`{verb}` is not a storage command"));
            }
        };

        let duration_ms = started_at.elapsed().as_millis();
        match result {
            Ok(payload) => {
                debug!("{}", success_event(verb, duration_ms, rows_removed));
                Outcome::Ok(payload)
            }
            Err(err) => {
                warn!(
                    "event=command_execute module=engine status=error verb={verb} duration_ms={duration_ms} error_code={}",
                    err.code()
                );
                Outcome::Error(err.to_string())
            }
        }
    }
}

/// One `command_execute` line per successful command; `del` adds its row count.
fn success_event(verb: &str, duration_ms: u128, rows_removed: Option<usize>) -> String {
    let mut line =
        format!("event=command_execute module=engine status=ok verb={verb} duration_ms={duration_ms}");
    if let Some(removed) = rows_removed {
        line.push_str(&format!(" rows_removed={removed}"));
    }
    line
}
