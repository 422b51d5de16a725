//! Compilation passes run by the simulator before execution.

use slitlab_hal::HalResult;
use slitlab_ir::{Circuit, Instruction};
use tracing::debug;

/// A circuit-to-circuit rewrite.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Rewrite the circuit.
    fn run(&self, circuit: Circuit) -> HalResult<Circuit>;
}

/// Cancels adjacent gate pairs whose product is the identity.
///
/// Two gates are adjacent when they act on the same operands in the same
/// order and no other instruction (gate, measurement or barrier) touches
/// any of those qubits in between. `H·H`, `X·X`, `CX·CX`, `S·Sdg` and
/// `Rz(θ)·Rz(-θ)` all qualify. A two-qubit gate between two Hadamards
/// blocks the pair, so entangling circuits keep their structure.
///
/// Runs to a fixed point: removing one pair can expose another.
#[derive(Debug, Default, Clone, Copy)]
pub struct CancelInversePairs;

impl CancelInversePairs {
    /// Create a new cancellation pass.
    pub fn new() -> Self {
        Self
    }

    /// Index of the next live instruction after `from` that touches any of
    /// `inst`'s qubits.
    fn next_on_wires(
        slots: &[Option<Instruction>],
        from: usize,
        inst: &Instruction,
    ) -> Option<usize> {
        slots
            .iter()
            .enumerate()
            .skip(from + 1)
            .find_map(|(idx, slot)| {
                let other = slot.as_ref()?;
                other
                    .qubits
                    .iter()
                    .any(|q| inst.qubits.contains(q))
                    .then_some(idx)
            })
    }

    fn cancel_once(slots: &mut [Option<Instruction>]) -> usize {
        let mut removed = 0;
        for idx in 0..slots.len() {
            let Some(inst) = slots[idx].as_ref() else {
                continue;
            };
            let Some(gate) = inst.as_gate() else {
                continue;
            };
            let Some(next) = Self::next_on_wires(slots, idx, inst) else {
                continue;
            };
            let cancels = slots[next].as_ref().is_some_and(|other| {
                other.qubits == inst.qubits && other.as_gate().is_some_and(|g| gate.cancels(g))
            });
            if cancels {
                slots[idx] = None;
                slots[next] = None;
                removed += 1;
            }
        }
        removed
    }
}

impl Pass for CancelInversePairs {
    fn name(&self) -> &str {
        "cancel_inverse_pairs"
    }

    fn run(&self, circuit: Circuit) -> HalResult<Circuit> {
        let name = circuit.name().to_string();
        let num_qubits = circuit.num_qubits() as u32;
        let num_clbits = circuit.num_clbits() as u32;

        let mut slots: Vec<Option<Instruction>> =
            circuit.into_instructions().into_iter().map(Some).collect();

        let mut total = 0;
        loop {
            let removed = Self::cancel_once(&mut slots);
            if removed == 0 {
                break;
            }
            total += removed;
        }
        debug!("{}: cancelled {} gate pair(s)", self.name(), total);

        let rewritten =
            Circuit::from_instructions(name, num_qubits, num_clbits, slots.into_iter().flatten())?;
        Ok(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slitlab_ir::{ClbitId, QubitId, StandardGate};

    fn gate_names(circuit: &Circuit) -> Vec<&str> {
        circuit.instructions().iter().map(Instruction::name).collect()
    }

    #[test]
    fn test_cancels_double_hadamard() {
        let mut circuit = Circuit::with_size("interference", 1, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();

        let out = CancelInversePairs::new().run(circuit).unwrap();
        assert_eq!(gate_names(&out), vec!["measure"]);
        assert_eq!(out.num_clbits(), 1);
    }

    #[test]
    fn test_keeps_entangled_hadamards() {
        let mut circuit = Circuit::with_size("observer", 2, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();

        let before = circuit.clone();
        let out = CancelInversePairs::new().run(circuit).unwrap();
        assert_eq!(out, before);
    }

    #[test]
    fn test_cancels_cx_pair_and_nested_pairs() {
        let mut circuit = Circuit::with_size("nested", 2, 0);
        circuit.h(QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.h(QubitId(1)).unwrap();

        let out = CancelInversePairs::new().run(circuit).unwrap();
        assert!(out.instructions().is_empty());
    }

    #[test]
    fn test_reversed_cx_is_not_cancelled() {
        let mut circuit = Circuit::with_size("reversed", 2, 0);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(0)).unwrap();

        let out = CancelInversePairs::new().run(circuit).unwrap();
        assert_eq!(out.num_ops(), 2);
    }

    #[test]
    fn test_measurement_blocks_cancellation() {
        let mut circuit = Circuit::with_size("blocked", 1, 1);
        circuit.x(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.x(QubitId(0)).unwrap();

        let out = CancelInversePairs::new().run(circuit).unwrap();
        assert_eq!(gate_names(&out), vec!["x", "measure", "x"]);
    }

    #[test]
    fn test_parametric_inverse() {
        let mut circuit = Circuit::with_size("rot", 1, 0);
        circuit.gate(StandardGate::Rz(0.7), [QubitId(0)]).unwrap();
        circuit.gate(StandardGate::Rz(-0.7), [QubitId(0)]).unwrap();
        circuit.gate(StandardGate::S, [QubitId(0)]).unwrap();

        let out = CancelInversePairs::new().run(circuit).unwrap();
        assert_eq!(gate_names(&out), vec!["s"]);
    }
}
