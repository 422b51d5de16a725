//! Backend trait and compiled executables.
//!
//! The [`Backend`] trait splits running a circuit into two stages:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ compile() ──→ execute()
//!    (sync, &ref)       (async)       (async)       (async)
//! ```
//!
//! `compile()` turns a [`Circuit`] into an [`Executable`] bound to the
//! backend that produced it; `execute()` samples it for a number of shots.
//! [`Backend::run`] chains the two.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use slitlab_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// A circuit compiled for a specific backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Executable {
    backend: String,
    circuit: Circuit,
}

impl Executable {
    /// Bind a compiled circuit to a backend name.
    pub fn new(backend: impl Into<String>, circuit: Circuit) -> Self {
        Self {
            backend: backend.into(),
            circuit,
        }
    }

    /// Name of the backend this was compiled for.
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// The compiled circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Check that this executable targets `backend`.
    pub fn ensure_backend(&self, backend: &str) -> HalResult<()> {
        if self.backend == backend {
            Ok(())
        } else {
            Err(HalError::BackendMismatch {
                expected: self.backend.clone(),
                actual: backend.to_string(),
            })
        }
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Circuit can be compiled as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Trait for quantum backends.
///
/// # Contract
///
/// - `capabilities()` is synchronous and infallible; implementations cache
///   them at construction time.
/// - `compile()` rejects circuits that `validate()` reports as invalid.
/// - `execute()` returns counts whose total equals the requested shots.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Validate a circuit against backend constraints.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Compile a circuit into an executable for this backend.
    async fn compile(&self, circuit: &Circuit) -> HalResult<Executable>;

    /// Execute a compiled circuit `shots` times.
    async fn execute(&self, executable: &Executable, shots: u32) -> HalResult<ExecutionResult>;

    /// Compile and execute in one step.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let executable = self.compile(circuit).await?;
        self.execute(&executable, shots).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Counts;

    struct ZeroBackend {
        caps: Capabilities,
    }

    #[async_trait]
    impl Backend for ZeroBackend {
        fn name(&self) -> &str {
            "zero"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::Valid)
        }

        async fn compile(&self, circuit: &Circuit) -> HalResult<Executable> {
            Ok(Executable::new(self.name(), circuit.clone()))
        }

        async fn execute(
            &self,
            executable: &Executable,
            shots: u32,
        ) -> HalResult<ExecutionResult> {
            executable.ensure_backend(self.name())?;
            let width = executable.circuit().num_clbits();
            let mut counts = Counts::new();
            counts.insert("0".repeat(width), u64::from(shots));
            Ok(ExecutionResult::new(counts, shots))
        }
    }

    #[test]
    fn test_validation_result_is_valid() {
        assert!(ValidationResult::Valid.is_valid());
        assert!(!ValidationResult::Invalid { reasons: vec![] }.is_valid());
    }

    #[test]
    fn test_executable_backend_check() {
        let exe = Executable::new("a", Circuit::with_size("c", 1, 1));
        assert!(exe.ensure_backend("a").is_ok());
        assert!(matches!(
            exe.ensure_backend("b"),
            Err(HalError::BackendMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_default_run_chains_compile_and_execute() {
        let backend = ZeroBackend {
            caps: Capabilities::simulator(2).with_name("zero"),
        };
        let circuit = Circuit::with_size("c", 2, 2);
        let result = backend.run(&circuit, 16).await.unwrap();
        assert_eq!(result.counts.get("00"), 16);
        assert_eq!(result.shots, 16);
    }

    #[tokio::test]
    async fn test_foreign_executable_rejected() {
        let backend = ZeroBackend {
            caps: Capabilities::simulator(1),
        };
        let exe = Executable::new("other", Circuit::with_size("c", 1, 1));
        assert!(backend.execute(&exe, 1).await.is_err());
    }
}
