//! `metakv` entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, and open the store once.
//! - Hand the open store to the REPL and close it on every exit path.
//!
//! # Invariants
//! - Only configuration or connection failures end the process with an
//!   error status, and only before the REPL starts.

mod config;
mod render;
mod repl;

use config::CliConfig;
use log::{error, info};
use metakv_core::db::open_db;
use metakv_core::{init_logging, SqliteRecordStore, StorageEngine, StoreError};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("[ERROR] Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("{}", config.describe());

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("[WARN] File logging disabled: {err}");
        }
    }

    println!("[OK] Opening {}", config.db_path.display());
    let store = match open_db(&config.db_path)
        .map_err(StoreError::from)
        .and_then(SqliteRecordStore::try_new)
    {
        Ok(store) => store,
        Err(err) => {
            error!("event=session_open module=cli status=error error={err}");
            eprintln!("[ERROR] Could not connect: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("[OK] Table 'metadata' is ready.\n");
    info!("event=session_open module=cli status=ok");

    let mut engine = StorageEngine::new(store);
    let result = repl::run(&mut engine);
    drop(engine);
    println!("\n[OK] Connection closed.");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] Terminal input failed: {err}");
            ExitCode::FAILURE
        }
    }
}
