//! Interactive read-eval-print loop.
//!
//! # Responsibility
//! - Read lines with history and line editing.
//! - Route each line: control verbs here, data verbs to the storage engine.
//!
//! # Invariants
//! - Only `exit`, end of input, or an interrupt end the loop; failed
//!   commands never do.

use crate::render;
use log::{error, info};
use metakv_core::{Command, RecordStore, StorageEngine};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Prompt shown while waiting for input.
pub const PROMPT: &str = "metakv> ";

/// What the loop should do after one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Keep reading; print the text when present.
    Continue(Option<String>),
    Exit,
}

/// Interprets one input line and executes it when it is a data command.
pub fn handle_line<S: RecordStore>(engine: &mut StorageEngine<S>, line: &str) -> LineAction {
    if line.trim().is_empty() {
        return LineAction::Continue(None);
    }

    let command = Command::parse(line);
    match &command {
        Command::Exit => LineAction::Exit,
        Command::Help => LineAction::Continue(Some(render::help_text())),
        Command::Invalid { .. } => LineAction::Continue(Some(render::usage_error(&command))),
        Command::Set { .. }
        | Command::Get { .. }
        | Command::Delete { .. }
        | Command::List
        | Command::Find { .. } => {
            let outcome = engine.execute(&command);
            LineAction::Continue(Some(render::render_outcome(&command, &outcome)))
        }
    }
}

/// Runs the loop on the terminal until the user leaves.
pub fn run<S: RecordStore>(engine: &mut StorageEngine<S>) -> Result<(), ReadlineError> {
    let mut editor = DefaultEditor::new()?;
    println!("{}", render::banner());
    info!("event=repl_start module=repl status=ok");

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => {
                error!("event=repl_read module=repl status=error error={err}");
                return Err(err);
            }
        };

        if !line.trim().is_empty() {
            // History is a convenience; failing to record it is not fatal.
            let _ = editor.add_history_entry(line.as_str());
        }

        match handle_line(engine, line.trim_end_matches(['\r', '\n'])) {
            LineAction::Continue(Some(text)) => println!("{text}"),
            LineAction::Continue(None) => {}
            LineAction::Exit => break,
        }
    }

    info!("event=repl_stop module=repl status=ok");
    Ok(())
}
