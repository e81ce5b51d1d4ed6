//! Text rendering for command outcomes.
//!
//! Every function here is pure and returns the text to print.

use metakv_core::{Command, Outcome, Payload, Record, Verb};

const KEY_HEADER: &str = "KEY";
const VALUE_HEADER: &str = "VALUE";

/// Banner printed when the REPL starts.
pub fn banner() -> String {
    "Metadata Manager  |  type 'help' for commands\n".to_string()
}

/// Help text listing every verb.
pub fn help_text() -> String {
    let width = Verb::ALL
        .iter()
        .map(|verb| verb.usage().len())
        .max()
        .unwrap_or(0);
    let mut text = String::from("\nCommands:\n");
    for verb in Verb::ALL {
        text.push_str(&format!(
            "  {:<width$}   {}\n",
            verb.usage(),
            verb.summary()
        ));
    }
    text
}

/// Usage error line for an invalid command.
pub fn usage_error(command: &Command) -> String {
    let usage = command
        .usage_error()
        .unwrap_or_else(|| "Invalid command. Type 'help'.".to_string());
    format!("[ERROR] {usage}")
}

/// Renders the outcome of a data command.
pub fn render_outcome(command: &Command, outcome: &Outcome) -> String {
    let payload = match outcome {
        Outcome::Ok(payload) => payload,
        Outcome::Error(message) => return format!("[ERROR] {message}"),
    };

    match (command, payload) {
        (Command::Set { key, value }, _) => format!("[OK] Set  '{key}' = '{value}'"),
        (Command::Delete { key }, _) => format!("[OK] Deleted key '{key}'"),
        (Command::Get { key }, Payload::Value(value)) => format!("  {key} = {value}"),
        (Command::Get { key }, _) => format!("  (key '{key}' not found)"),
        (_, Payload::Records(records)) => render_table(records),
        (_, Payload::Value(value)) => format!("  {value}"),
        (_, Payload::None) => "[OK]".to_string(),
    }
}

/// Renders records as a boxed two-column table with a row count.
pub fn render_table(records: &[Record]) -> String {
    if records.is_empty() {
        return "  (no records found)".to_string();
    }

    let key_width = column_width(records.iter().map(|record| record.key.as_str()), KEY_HEADER);
    let value_width = column_width(
        records.iter().map(|record| record.value.as_str()),
        VALUE_HEADER,
    );
    let separator = format!(
        "  +{}+{}+",
        "-".repeat(key_width + 2),
        "-".repeat(value_width + 2)
    );

    let mut lines = vec![
        separator.clone(),
        format!("  | {KEY_HEADER:<key_width$} | {VALUE_HEADER:<value_width$} |"),
        separator.clone(),
    ];
    for record in records {
        lines.push(format!(
            "  | {:<key_width$} | {:<value_width$} |",
            record.key, record.value
        ));
    }
    lines.push(separator);
    lines.push(format!("  {} row(s)\n", records.len()));
    lines.join("\n")
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>, header: &str) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

#[cfg(test)]
mod tests {
    use super::{help_text, render_outcome, render_table, usage_error};
    use metakv_core::{Command, Outcome, Payload, Record};

    #[test]
    fn table_is_boxed_and_counts_rows() {
        let table = render_table(&[Record::new("app.name", "metakv"), Record::new("a", "1")]);
        let expected = [
            "  +----------+--------+",
            "  | KEY      | VALUE  |",
            "  +----------+--------+",
            "  | app.name | metakv |",
            "  | a        | 1      |",
            "  +----------+--------+",
            "  2 row(s)\n",
        ]
        .join("\n");
        assert_eq!(table, expected);
    }

    #[test]
    fn table_keeps_header_width_for_short_cells() {
        let table = render_table(&[Record::new("k", "v")]);
        assert!(table.contains("  | KEY | VALUE |"));
        assert!(table.contains("  | k   | v     |"));
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(render_table(&[]), "  (no records found)");
    }

    #[test]
    fn get_distinguishes_value_from_absence() {
        let get = Command::parse("get color");
        assert_eq!(
            render_outcome(&get, &Outcome::Ok(Payload::Value("blue".to_string()))),
            "  color = blue"
        );
        assert_eq!(
            render_outcome(&get, &Outcome::Ok(Payload::None)),
            "  (key 'color' not found)"
        );
    }

    #[test]
    fn writes_confirm_and_errors_are_prefixed() {
        assert_eq!(
            render_outcome(&Command::parse("set k two words"), &Outcome::Ok(Payload::None)),
            "[OK] Set  'k' = 'two words'"
        );
        assert_eq!(
            render_outcome(&Command::parse("del k"), &Outcome::Ok(Payload::None)),
            "[OK] Deleted key 'k'"
        );
        assert_eq!(
            render_outcome(
                &Command::parse("list"),
                &Outcome::Error("database is locked".to_string())
            ),
            "[ERROR] database is locked"
        );
    }

    #[test]
    fn usage_errors_and_help_mention_verbs() {
        assert_eq!(
            usage_error(&Command::parse("del")),
            "[ERROR] Usage: del <key>"
        );
        let help = help_text();
        for verb in ["set", "get", "del", "list", "find", "help", "exit"] {
            assert!(help.contains(verb), "help misses {verb}");
        }
    }
}
