//! Errors raised by the todo engine
//!
//! Only validation failures are errors. Missing items and categories are
//! reported through `Option`/`bool` return values instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("Invalid argument `{param}`: {message}")]
    InvalidArgument {
        param: &'static str,
        message: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl TodoError {
    pub(crate) fn invalid(param: &'static str, message: impl Into<String>) -> Self {
        TodoError::InvalidArgument {
            param,
            message: message.into(),
        }
    }

    /// Returns the offending parameter name for validation failures
    pub fn param(&self) -> Option<&'static str> {
        match self {
            TodoError::InvalidArgument { param, .. } => Some(param),
            TodoError::Conflict(_) => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, TodoError::Conflict(_))
    }
}

/// Rejects blank or whitespace-only text
pub(crate) fn require_text(param: &'static str, value: &str, what: &str) -> Result<(), TodoError> {
    if value.trim().is_empty() {
        return Err(TodoError::invalid(param, format!("{} cannot be empty", what)));
    }
    Ok(())
}
