//! slitlab Hardware Abstraction Layer
//!
//! A small, backend-agnostic interface for running circuits:
//! - the [`Backend`] trait with separate compile and execute stages
//! - [`Capabilities`] describing qubit count, gates and shot limits
//! - [`ExecutionResult`] and [`Counts`] for measurement histograms
//!
//! # Example
//!
//! ```ignore
//! use slitlab_hal::Backend;
//! use slitlab_adapter_sim::SimulatorBackend;
//! use slitlab_ir::Circuit;
//!
//! let backend = SimulatorBackend::with_seed(7);
//! let circuit = Circuit::bell()?;
//! let result = backend.run(&circuit, 1000).await?;
//! println!("P(00) = {:.3}", result.counts.probability("00"));
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{Backend, Executable, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
