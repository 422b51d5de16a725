//! Error types for the HAL crate.

use slitlab_ir::IrError;
use thiserror::Error;

/// Errors that can occur in backend operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Executable was compiled for a different backend.
    #[error("Executable compiled for '{expected}' cannot run on '{actual}'")]
    BackendMismatch {
        /// Backend the executable was compiled for.
        expected: String,
        /// Backend asked to run it.
        actual: String,
    },

    /// Circuit could not be rebuilt after a compilation pass.
    #[error("Circuit rewrite failed: {0}")]
    Ir(#[from] IrError),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
