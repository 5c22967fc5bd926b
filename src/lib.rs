pub mod commands;
pub mod config;
pub mod enrich;
pub mod error;
pub mod export;
pub mod logger;
pub mod models;
pub mod parsers;
pub mod session;
pub mod templates;

pub use error::{PlannerError, Result};
pub use session::{ExportedDocument, Session};
