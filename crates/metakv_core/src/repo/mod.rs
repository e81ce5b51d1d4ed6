//! Storage boundary for metadata records.
//!
//! # Responsibility
//! - Define the capability contract the storage engine executes against.
//! - Keep SQL text and row decoding inside the core persistence boundary.
//!
//! # Invariants
//! - Keys and values are always bound as statement parameters.
//! - Absence of a key is `Ok(None)` / zero rows, never an error.

pub mod record_repo;
