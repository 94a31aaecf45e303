use crate::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed on {} field(s)", .0.len())]
    InvalidFields(Vec<FieldError>),

    #[error("Conflict: {0}")]
    Conflict(String),
}
