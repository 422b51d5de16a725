//! Double-slit experiments for slitlab.
//!
//! Two fixed circuits contrast interference with which-path observation:
//!
//! | Scenario | Circuit | Ideal outcome |
//! |----------|---------|---------------|
//! | Interference | `H q0; H q0; measure q0 -> c0` | always `0` |
//! | Observer | `H q0; CX q0, q1; H q0; measure q0 -> c0` | `0` or `1`, 50/50 |
//!
//! The CX copies the path of `q0` onto `q1`. The second Hadamard then acts
//! on a qubit entangled with a record of its path, and the interference
//! term vanishes.
//!
//! # Example
//!
//! ```ignore
//! use slitlab_adapter_sim::SimulatorBackend;
//! use slitlab_experiment::{Scenario, SHOTS, run_scenarios};
//!
//! let backend = SimulatorBackend::new();
//! let outcomes = run_scenarios(&backend, &Scenario::ALL, SHOTS).await?;
//! assert_eq!(outcomes[0].counts.get("0"), u64::from(SHOTS));
//! ```

pub mod error;
pub mod runner;
pub mod scenario;
pub mod spec;

pub use error::{SimulationError, SimulationResult};
pub use runner::{run_experiment, run_scenarios};
pub use scenario::{Scenario, ScenarioOutcome};
pub use spec::{CircuitSpec, Operation, SHOTS};
