//! Domain model for the key/value metadata table.
//!
//! # Invariants
//! - At most one `Record` exists per key at any time.
//! - Values are opaque text; the core never transforms them.

pub mod record;
