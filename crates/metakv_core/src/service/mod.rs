//! Command execution services.
//!
//! # Responsibility
//! - Map typed commands onto single storage calls.
//! - Keep REPL/CLI layers decoupled from storage details.

pub mod storage_engine;
