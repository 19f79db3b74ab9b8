use thiserror::Error;

use crate::models::ClaimStatus;

/// One field-level validation message, keyed by the field's wire name so a
/// form layer can attach it to the right input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("claim {id} not found")]
    NotFound { id: String },

    #[error("illegal status transition: {from} -> {to}")]
    InvalidTransition { from: ClaimStatus, to: ClaimStatus },

    #[error("storage medium unavailable: {0}")]
    Persistence(String),
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
