//! Core domain errors.

use thiserror::Error;

/// Core domain errors for OpsDesk.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Execution mode string not recognised.
    #[error("Unknown execution kind: {0}")]
    UnknownKind(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
