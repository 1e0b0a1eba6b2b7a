//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, InputError};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("table file not found: {0}")]
    TableNotFound(PathBuf),

    #[error("no table given: pass --file or set `table` in the config")]
    NoTable,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<InputError> for ApplicationError {
    fn from(e: InputError) -> Self {
        ApplicationError::Domain(DomainError::Input(e))
    }
}

impl ApplicationError {
    /// The rejected request, if this error is one.
    pub fn as_input_error(&self) -> Option<&InputError> {
        match self {
            ApplicationError::Domain(DomainError::Input(e)) => Some(e),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
