//! Error types for running experiments.

use slitlab_hal::HalError;
use slitlab_ir::IrError;
use thiserror::Error;

/// Errors raised while running a scenario. Every variant names the
/// scenario that failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimulationError {
    /// The circuit description could not be turned into a circuit.
    #[error("scenario '{scenario}': circuit could not be built")]
    Build {
        /// Scenario name.
        scenario: String,
        /// Underlying IR error.
        #[source]
        source: IrError,
    },

    /// The backend failed to compile or execute the circuit.
    #[error("scenario '{scenario}': backend failed")]
    Backend {
        /// Scenario name.
        scenario: String,
        /// Underlying backend error.
        #[source]
        source: HalError,
    },

    /// The backend returned a different number of trials than requested.
    #[error("scenario '{scenario}': expected {expected} shots, backend returned {actual}")]
    CountMismatch {
        /// Scenario name.
        scenario: String,
        /// Requested shots.
        expected: u64,
        /// Sum of the returned counts.
        actual: u64,
    },
}

impl SimulationError {
    /// Name of the scenario that failed.
    pub fn scenario(&self) -> &str {
        match self {
            SimulationError::Build { scenario, .. }
            | SimulationError::Backend { scenario, .. }
            | SimulationError::CountMismatch { scenario, .. } => scenario,
        }
    }
}

/// Result type for experiment operations.
pub type SimulationResult<T> = Result<T, SimulationError>;
