use thiserror::Error;

pub type Result<T> = std::result::Result<T, NoteError>;

/// Failure taxonomy for every summary-note operation.
///
/// Operations never let anything else escape: gateway and codec layers map
/// their failures into one of these variants at their own boundary.
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("store request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Unknown(String),
}
