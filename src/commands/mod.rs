//! Line commands that drive a [`Session`].

mod draft;
mod export;
mod template;

use crate::error::{PlannerError, Result};
use crate::session::Session;
use tracing::debug;

// (usage, description)
const COMMANDS: &[(&str, &str)] = &[
    ("show [field]", "Show the draft or a single field"),
    ("fields", "List field ids"),
    ("set <field> <value>", "Set a field; use \\n for new lines"),
    ("clear", "Reset every field"),
    ("templates", "List templates"),
    ("load <name|number>", "Load a template into the draft"),
    ("save [name]", "Save the draft as a template"),
    ("enrich <field> [formal|lively]", "Rewrite a section with its template"),
    ("export [dir]", "Write the proposal document"),
    ("help", "Show this list"),
    ("quit", "End the session"),
];

/// Result of handling one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Quit,
}

pub fn help() -> String {
    COMMANDS
        .iter()
        .map(|(usage, description)| format!("{:<32} {}", usage, description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Dispatches one input line against `session`
///
/// Blank lines reply with an empty string. Errors leave the session as it
/// was before the command.
pub fn handle_line(session: &mut Session, line: &str) -> Result<Outcome> {
    let line = line.trim();
    let (command, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    debug!(command, "Handling session command");

    let reply = match command {
        "" => String::new(),
        "show" => draft::show(session, args)?,
        "fields" => draft::fields(),
        "set" => draft::set(session, args)?,
        "clear" => draft::clear(session),
        "enrich" => draft::enrich(session, args)?,
        "templates" => template::list(session),
        "load" => template::load(session, args)?,
        "save" => template::save(session, args),
        "export" => export::export(session, args)?,
        "help" | "?" => help(),
        "quit" | "exit" => return Ok(Outcome::Quit),
        other => {
            return Err(PlannerError::InvalidArgument(format!(
                "Unknown command: {} (try 'help')",
                other
            )))
        }
    };

    Ok(Outcome::Reply(reply))
}
