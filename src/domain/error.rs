//! Domain-level errors

use thiserror::Error;

/// Domain errors represent invalid configuration or malformed input.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{option}: missing required value")]
    MissingOption { option: &'static str },

    #[error("{option}: unsupported value '{value}'")]
    UnsupportedValue { option: &'static str, value: String },

    #[error("{option}: empty entry in level list '{value}'")]
    EmptyLevelEntry { option: &'static str, value: String },

    #[error("{option}: '{entry}' is not an integer")]
    InvalidLevelEntry { option: &'static str, entry: String },

    #[error(
        "{option}: level {level} must be between 1 and {max}",
        max = crate::domain::level_policy::MAX_LEVEL
    )]
    LevelOutOfRange { option: &'static str, level: i64 },

    #[error("level list must not be empty")]
    EmptyLevelList,

    #[error("invalid outline at line {line}: {message}")]
    InvalidOutline { line: usize, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
