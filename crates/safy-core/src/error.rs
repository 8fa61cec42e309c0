use std::result::Result as StdResult;

use thiserror::Error;

/// Error type that captures common engine failures.
///
/// Parse and not-found failures are recoverable by design: callers keep or
/// reset their state and surface a message, never abort the process.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Share not found: {0}")]
    ShareNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, CoreError>;
