//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("could not find project: {0}")]
    ProjectNotFound(String),

    #[error("could not find custom column: {0}")]
    ColumnNotFound(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// Configuration problems are fatal at activation time.
    pub fn is_config(&self) -> bool {
        match self {
            ApplicationError::Domain(DomainError::InvalidOutline { .. }) => false,
            ApplicationError::Domain(_)
            | ApplicationError::ProjectNotFound(_)
            | ApplicationError::ColumnNotFound(_)
            | ApplicationError::Config { .. } => true,
            ApplicationError::OperationFailed { .. } => false,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
