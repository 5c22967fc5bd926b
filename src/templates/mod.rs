mod builtin;

use crate::error::{PlannerError, Result};
use crate::models::{Draft, FieldId, FieldValues, TemplateEntry};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tracing::info;

pub use builtin::builtin_templates;

const SAVED_MARKER: &str = "💾 ";

/// Named templates for one session.
///
/// Names keep insertion order: built-ins first, then saves in the order
/// they happened. Saving under an existing name replaces the values in
/// place.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    entries: IndexMap<String, TemplateEntry>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl TemplateStore {
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut store = Self::empty();
        for entry in builtin_templates() {
            store.entries.insert(entry.name.clone(), entry);
        }
        store
    }

    pub fn list_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Stores an owned copy of `values` under `name`
    pub fn save(&mut self, name: &str, values: &FieldValues) {
        let entry = TemplateEntry::new(name, values.clone());
        let replaced = self.entries.insert(name.to_string(), entry).is_some();
        info!(template = name, replaced, "Template saved");
    }

    /// Snapshots `draft` into the store and returns the name used.
    ///
    /// Without an explicit name one is derived from the draft's name field,
    /// see [`derive_template_name`].
    pub fn save_draft(
        &mut self,
        draft: &Draft,
        explicit_name: Option<&str>,
        name_chars: usize,
        now: NaiveDateTime,
    ) -> String {
        let name = match explicit_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => derive_template_name(draft.get(FieldId::Name), name_chars, now),
        };
        self.save(&name, &draft.snapshot());
        name
    }

    pub fn load(&self, name: &str) -> Result<&FieldValues> {
        self.entries
            .get(name)
            .map(|entry| &entry.values)
            .ok_or_else(|| PlannerError::TemplateNotFound(name.to_string()))
    }
}

/// Builds a template name from a proposal name.
///
/// Takes the first `max_chars` characters of the trimmed name behind the
/// saved-template marker. An empty name falls back to a timestamp.
pub fn derive_template_name(proposal_name: &str, max_chars: usize, now: NaiveDateTime) -> String {
    let trimmed = proposal_name.trim();
    if trimmed.is_empty() {
        return format!("{}範本 {}", SAVED_MARKER, now.format("%m%d-%H%M%S"));
    }
    let short: String = trimmed.chars().take(max_chars.max(1)).collect();
    format!("{}{}", SAVED_MARKER, short)
}
