//! Command interpreter for REPL input lines.
//!
//! # Responsibility
//! - Turn one raw input line into a typed [`Command`].
//! - Own verb spelling, aliases and usage text.
//!
//! # Invariants
//! - Parsing has no side effects and never fails: malformed input becomes
//!   [`Command::Invalid`] carrying the original text.
//! - Verb matching is case-insensitive; keys and values keep their case.
//! - `find` patterns are forwarded verbatim; wildcard meaning belongs to the
//!   storage backend.

use std::fmt::{Display, Formatter};

/// User-facing verbs understood by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Set,
    Get,
    Delete,
    List,
    Find,
    Help,
    Exit,
}

impl Verb {
    /// All verbs in help-banner order.
    pub const ALL: [Verb; 7] = [
        Verb::Set,
        Verb::Get,
        Verb::Delete,
        Verb::List,
        Verb::Find,
        Verb::Help,
        Verb::Exit,
    ];

    /// Canonical spelling typed by the user.
    pub fn name(self) -> &'static str {
        match self {
            Verb::Set => "set",
            Verb::Get => "get",
            Verb::Delete => "del",
            Verb::List => "list",
            Verb::Find => "find",
            Verb::Help => "help",
            Verb::Exit => "exit",
        }
    }

    /// Argument synopsis shown in usage errors and help.
    pub fn usage(self) -> &'static str {
        match self {
            Verb::Set => "set <key> <value>",
            Verb::Get => "get <key>",
            Verb::Delete => "del <key>",
            Verb::List => "list",
            Verb::Find => "find <pattern>",
            Verb::Help => "help",
            Verb::Exit => "exit",
        }
    }

    /// One-line description for the help banner.
    pub fn summary(self) -> &'static str {
        match self {
            Verb::Set => "Insert or update a key/value pair",
            Verb::Get => "Retrieve value for a key",
            Verb::Delete => "Delete a key",
            Verb::List => "List all key/value pairs",
            Verb::Find => "Search keys by LIKE pattern (e.g.  app.%)",
            Verb::Help => "Show this help",
            Verb::Exit => "Quit",
        }
    }

    fn from_token(token: &str) -> Option<Verb> {
        match token.to_lowercase().as_str() {
            "set" => Some(Verb::Set),
            "get" => Some(Verb::Get),
            "del" => Some(Verb::Delete),
            "list" => Some(Verb::List),
            "find" => Some(Verb::Find),
            "help" => Some(Verb::Help),
            "exit" | "quit" | "q" => Some(Verb::Exit),
            _ => None,
        }
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    List,
    Find { pattern: String },
    Help,
    Exit,
    /// Input that does not form a command.
    ///
    /// `verb` is set when the leading token was recognized but the argument
    /// count was wrong, so callers can print the matching usage line.
    Invalid { raw: String, verb: Option<Verb> },
}

impl Command {
    /// Parses a single input line, already stripped of its newline.
    pub fn parse(line: &str) -> Command {
        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            return Command::invalid(line, None);
        };
        let Some(verb) = Verb::from_token(head) else {
            return Command::invalid(line, None);
        };
        let args: Vec<&str> = tokens.collect();

        match verb {
            Verb::Set => match args.split_first() {
                Some((key, value)) if !value.is_empty() => Command::Set {
                    key: (*key).to_string(),
                    value: value.join(" "),
                },
                _ => Command::invalid(line, Some(verb)),
            },
            Verb::Get => match args.as_slice() {
                [key] => Command::Get {
                    key: (*key).to_string(),
                },
                _ => Command::invalid(line, Some(verb)),
            },
            Verb::Delete => match args.as_slice() {
                [key] => Command::Delete {
                    key: (*key).to_string(),
                },
                _ => Command::invalid(line, Some(verb)),
            },
            Verb::Find => match args.as_slice() {
                [pattern] => Command::Find {
                    pattern: (*pattern).to_string(),
                },
                _ => Command::invalid(line, Some(verb)),
            },
            // Trailing tokens are ignored for zero-argument verbs.
            Verb::List => Command::List,
            Verb::Help => Command::Help,
            Verb::Exit => Command::Exit,
        }
    }

    /// Returns the verb this command was parsed from, if any.
    pub fn verb(&self) -> Option<Verb> {
        match self {
            Command::Set { .. } => Some(Verb::Set),
            Command::Get { .. } => Some(Verb::Get),
            Command::Delete { .. } => Some(Verb::Delete),
            Command::List => Some(Verb::List),
            Command::Find { .. } => Some(Verb::Find),
            Command::Help => Some(Verb::Help),
            Command::Exit => Some(Verb::Exit),
            Command::Invalid { verb, .. } => *verb,
        }
    }

    /// Usage message for an invalid command; `None` for valid ones.
    pub fn usage_error(&self) -> Option<String> {
        let Command::Invalid { raw, verb } = self else {
            return None;
        };
        Some(match verb {
            Some(Verb::Find) => format!("Usage: {}  e.g.  find app.%", Verb::Find.usage()),
            Some(verb) => format!("Usage: {}", verb.usage()),
            None => match raw.split_whitespace().next() {
                Some(token) => format!("Unknown command '{token}'. Type 'help'."),
                None => "Empty command. Type 'help'.".to_string(),
            },
        })
    }

    fn invalid(line: &str, verb: Option<Verb>) -> Command {
        Command::Invalid {
            raw: line.to_string(),
            verb,
        }
    }
}
