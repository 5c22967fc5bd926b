use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Document serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

// Writing the package is the only place zip errors can surface
impl From<zip::result::ZipError> for PlannerError {
    fn from(err: zip::result::ZipError) -> Self {
        PlannerError::Serialization(err.to_string())
    }
}
