// src/errors.rs

use thiserror::Error;

/// Errors raised by the descriptor model and the usage formatter.
///
/// Rendering a well-formed tree never fails; these surface either at
/// configuration time or from explicit lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("Asking description for unknown command: {0}")]
    CommandNotFound(String),
    #[error("Invalid column size {0}: it must be greater than zero.")]
    InvalidColumnSize(usize),
    #[error("A parameter must declare at least one name.")]
    UnnamedParameter,
    #[error("Command '{0}' is registered more than once.")]
    DuplicateCommand(String),
}

/// Result alias for descriptor and formatter operations.
pub type UsageResult<T> = Result<T, UsageError>;
