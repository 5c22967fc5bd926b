use super::draft::FieldValues;
use serde::{Deserialize, Serialize};

/// A named snapshot of field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    pub values: FieldValues,
}

impl TemplateEntry {
    pub fn new(name: impl Into<String>, values: FieldValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}
