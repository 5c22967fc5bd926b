mod draft;
mod field;
mod template;

pub use draft::{Draft, FieldValues};
pub use field::{Field, FieldId, TabularKind, REGISTRY};
pub use template::TemplateEntry;
