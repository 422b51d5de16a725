//! The local statevector [`SimulatorBackend`].

use std::time::Instant;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use slitlab_hal::{
    Backend, Capabilities, Counts, Executable, ExecutionResult, HalError, HalResult,
    ValidationResult,
};
use slitlab_ir::{Circuit, InstructionKind};

use crate::passes::{CancelInversePairs, Pass};
use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Statevector simulator behind the [`Backend`] trait.
///
/// Without a seed every
/// execution draws fresh entropy; with a seed every execution restarts the
/// same random stream, so repeated runs of one executable give identical
/// counts.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    seed: Option<u64>,
    /// Passes applied by `compile`, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl SimulatorBackend {
    /// Unseeded, up to 20 qubits, inverse-pair cancellation enabled.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Unseeded simulator accepting circuits up to `max_qubits` wide.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            seed: None,
            passes: vec![Box::new(CancelInversePairs::new())],
        }
    }

    /// Create a simulator whose sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::new().seeded(seed)
    }

    /// Set the sampling seed.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the capabilities, e.g. to restrict the gate set.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Skip optimisation passes; `compile` then only validates.
    pub fn without_passes(mut self) -> Self {
        self.passes.clear();
        self
    }

    /// The sampling seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn too_wide(&self, circuit: &Circuit) -> Option<String> {
        let max_qubits = self.capabilities.num_qubits as usize;
        (circuit.num_qubits() > max_qubits).then(|| {
            format!(
                "circuit '{}' needs {} qubits, {} has {}",
                circuit.name(),
                circuit.num_qubits(),
                self.name(),
                max_qubits
            )
        })
    }

    fn check_validation(&self, circuit: &Circuit) -> Vec<String> {
        let mut reasons: Vec<String> = self.too_wide(circuit).into_iter().collect();
        for inst in circuit.instructions() {
            if let Some(gate) = inst.as_gate() {
                if !self.capabilities.gate_set.supports(gate) {
                    let reason = format!("gate '{}' is not supported", gate.name());
                    if !reasons.contains(&reason) {
                        reasons.push(reason);
                    }
                }
            }
        }
        reasons
    }

    /// Reject circuits this backend cannot simulate.
    fn ensure_runnable(&self, circuit: &Circuit) -> HalResult<()> {
        if let Some(reason) = self.too_wide(circuit) {
            return Err(HalError::CircuitTooLarge(reason));
        }
        let reasons = self.check_validation(circuit);
        if !reasons.is_empty() {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }
        Ok(())
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();
        let mut rng = self.rng();

        debug!(qubits = circuit.num_qubits(), shots, "Simulating");

        let counts = if measurements_are_terminal(circuit) {
            debug!("All measurements terminal, sampling one statevector");
            sample_terminal(circuit, shots, &mut rng)
        } else {
            debug!("Mid-circuit measurement, simulating each shot");
            sample_per_shot(circuit, shots, &mut rng)
        };

        let elapsed = start.elapsed();
        debug!(?elapsed, outcomes = counts.len(), "Simulation done");

        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        ExecutionResult::new(counts, shots).with_execution_time(elapsed_ms)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let reasons = self.check_validation(circuit);
        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn compile(&self, circuit: &Circuit) -> HalResult<Executable> {
        self.ensure_runnable(circuit)?;

        let mut compiled = circuit.clone();
        for pass in &self.passes {
            let before = compiled.num_ops();
            compiled = pass.run(compiled)?;
            debug!(
                "Pass {}: {} -> {} ops",
                pass.name(),
                before,
                compiled.num_ops()
            );
        }

        Ok(Executable::new(self.name(), compiled))
    }

    #[instrument(skip(self, executable), fields(circuit = executable.circuit().name()))]
    async fn execute(&self, executable: &Executable, shots: u32) -> HalResult<ExecutionResult> {
        executable.ensure_backend(self.name())?;

        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{} shots requested but {} allows at most {}",
                shots,
                self.name(),
                self.capabilities.max_shots
            )));
        }

        // Executables can be built without `compile`.
        self.ensure_runnable(executable.circuit())?;

        Ok(self.run_simulation(executable.circuit(), shots))
    }
}

/// Which qubit feeds which classical bit, and the register width.
///
/// A circuit without measurements reads out every qubit, qubit `k` into
/// bit `k`.
fn readout(circuit: &Circuit) -> (Vec<(usize, usize)>, usize) {
    if !circuit.has_measurements() {
        let n = circuit.num_qubits();
        return ((0..n).map(|q| (q, q)).collect(), n);
    }

    let pairs = circuit
        .instructions()
        .iter()
        .filter(|inst| inst.is_measure())
        .flat_map(|inst| {
            inst.qubits
                .iter()
                .zip(&inst.clbits)
                .map(|(q, c)| (q.index(), c.index()))
        })
        .collect();
    (pairs, circuit.num_clbits())
}

/// True when no gate acts on a qubit after it has been measured.
fn measurements_are_terminal(circuit: &Circuit) -> bool {
    let mut measured = vec![false; circuit.num_qubits()];
    for inst in circuit.instructions() {
        match inst.kind {
            InstructionKind::Measure => {
                for q in &inst.qubits {
                    measured[q.index()] = true;
                }
            }
            InstructionKind::Gate(_) => {
                if inst.qubits.iter().any(|q| measured[q.index()]) {
                    return false;
                }
            }
            InstructionKind::Barrier => {}
        }
    }
    true
}

fn bitstring(bits: &[bool]) -> String {
    bits.iter().rev().map(|&b| if b { '1' } else { '0' }).collect()
}

fn sample_terminal(circuit: &Circuit, shots: u32, rng: &mut StdRng) -> Counts {
    let mut sv = Statevector::new(circuit.num_qubits());
    for inst in circuit.instructions() {
        if let Some(gate) = inst.as_gate() {
            let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
            sv.apply_gate(gate, &qubits);
        }
    }

    let (pairs, width) = readout(circuit);
    let mut counts = Counts::new();
    let mut bits = vec![false; width];
    for _ in 0..shots {
        let outcome = sv.sample(rng);
        bits.fill(false);
        for &(qubit, clbit) in &pairs {
            bits[clbit] = (outcome >> qubit) & 1 == 1;
        }
        counts.insert(bitstring(&bits), 1);
    }
    counts
}

fn sample_per_shot(circuit: &Circuit, shots: u32, rng: &mut StdRng) -> Counts {
    let mut counts = Counts::new();
    let mut bits = vec![false; circuit.num_clbits()];

    for shot in 0..shots {
        let mut sv = Statevector::new(circuit.num_qubits());
        bits.fill(false);
        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
                    sv.apply_gate(gate, &qubits);
                }
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                        bits[c.index()] = sv.measure(q.index(), rng);
                    }
                }
                InstructionKind::Barrier => {}
            }
        }
        counts.insert(bitstring(&bits), 1);

        if (shot + 1) % 1000 == 0 {
            debug!(completed = shot + 1, "Shots simulated");
        }
    }
    counts
}
