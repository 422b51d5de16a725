//! slitlab Local Statevector Simulator
//!
//! An exact statevector simulator implementing the [`Backend`] trait from
//! `slitlab-hal`. Results are sampled from the final state, so counts carry
//! shot noise even though the amplitudes are exact.
//!
//! # Compilation
//!
//! [`Backend::compile`] validates the circuit against the simulator's
//! [`Capabilities`] (qubit count, gate set) and then runs
//! [`CancelInversePairs`], which removes adjacent gate pairs that multiply
//! to the identity.
//!
//! # Sampling
//!
//! When every measurement is terminal the statevector is evolved once and
//! sampled `shots` times. Circuits that keep operating on a qubit after
//! measuring it are simulated shot by shot with state collapse.
//!
//! # Example
//!
//! ```ignore
//! use slitlab_adapter_sim::SimulatorBackend;
//! use slitlab_hal::Backend;
//! use slitlab_ir::Circuit;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::with_seed(7);
//!
//!     let circuit = Circuit::bell()?;
//!     let executable = backend.compile(&circuit).await?;
//!     let result = backend.execute(&executable, 1000).await?;
//!
//!     // Expect ~50% |00⟩ and ~50% |11⟩
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```
//!
//! [`Backend`]: slitlab_hal::Backend
//! [`Backend::compile`]: slitlab_hal::Backend::compile
//! [`Capabilities`]: slitlab_hal::Capabilities

mod passes;
mod simulator;
mod statevector;

pub use passes::{CancelInversePairs, Pass};
pub use simulator::SimulatorBackend;
