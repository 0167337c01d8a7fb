use thiserror::Error;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template '{id}' not found")]
    TemplateNotFound { id: String },

    #[error("Template is missing required field '{field}'")]
    MissingField { field: String },

    #[error("Invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("Invalid element '{id}': {reason}")]
    InvalidElement { id: String, reason: String },

    #[error("Duplicate element id '{id}': element ids must be unique within a customization map")]
    DuplicateElementId { id: String },

    #[error("Invalid color value '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(String),
}

impl From<serde_yaml::Error> for TemplateError {
    fn from(err: serde_yaml::Error) -> Self {
        TemplateError::DeserializationError(err.to_string())
    }
}

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::DeserializationError(err.to_string())
    }
}

impl From<zip::result::ZipError> for TemplateError {
    fn from(err: zip::result::ZipError) -> Self {
        TemplateError::Archive(err.to_string())
    }
}
