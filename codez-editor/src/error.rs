use codez_template::TemplateError;
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

/// Failures of the isolated preview surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    #[error("Preview frame not available")]
    SurfaceUnavailable,

    #[error("Cannot access preview document")]
    DocumentInaccessible,
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Session {id} not found")]
    SessionNotFound { id: String },

    #[error("No template selected")]
    NoTemplateSelected,

    #[error("Element '{id}' not found in the customization map")]
    ElementNotFound { id: String },

    #[error(transparent)]
    Preview(#[from] PreviewError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}
