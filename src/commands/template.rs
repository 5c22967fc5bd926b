use crate::error::{PlannerError, Result};
use crate::session::Session;

/// Lists template names, numbered from 1
pub fn list(session: &Session) -> String {
    session
        .templates()
        .list_names()
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:>2}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Loads a template by exact name or by its number in [`list`]
pub fn load(session: &mut Session, args: &str) -> Result<String> {
    let name = resolve_name(session, args)?;
    session.load_template(&name)?;
    Ok(format!("Loaded {}", name))
}

/// Saves the draft as a template, deriving the name when none is given
pub fn save(session: &mut Session, args: &str) -> String {
    let name = args.trim();
    let saved = session.save_template((!name.is_empty()).then_some(name));
    format!("Saved {}", saved)
}

fn resolve_name(session: &Session, args: &str) -> Result<String> {
    let wanted = args.trim();
    if wanted.is_empty() {
        return Err(PlannerError::InvalidArgument(
            "A template name or number is required".to_string(),
        ));
    }

    let store = session.templates();
    if store.contains(wanted) {
        return Ok(wanted.to_string());
    }

    match wanted.parse::<usize>() {
        Ok(n) if n >= 1 => store
            .list_names()
            .get(n - 1)
            .map(|name| name.to_string())
            .ok_or_else(|| PlannerError::TemplateNotFound(wanted.to_string())),
        // Let the store report the miss
        _ => Ok(wanted.to_string()),
    }
}
