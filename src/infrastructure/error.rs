//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Failures at the process boundary: terminal prompts and raw I/O.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read confirmation for '{question}'")]
    Confirmation {
        question: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn confirmation(question: impl Into<String>, source: std::io::Error) -> Self {
        Self::Confirmation {
            question: question.into(),
            source,
        }
    }
}

pub type InfraResult<T> = Result<T, InfraError>;
