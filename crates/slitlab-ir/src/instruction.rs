//! Instructions: an operation plus the wires it acts on.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// What an [`Instruction`] does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Unitary gate on `qubits`.
    Gate(StandardGate),
    /// Reads `qubits[i]` into `clbits[i]` and collapses it.
    Measure,
    /// Scheduling fence; leaves the state untouched.
    Barrier,
}

/// One step of a circuit.
///
/// Operand ranges are not checked here; [`Circuit::apply`] does that
/// against the owning circuit's registers.
///
/// [`Circuit::apply`]: crate::Circuit::apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    /// Written classical bits, empty unless `kind` is `Measure`.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// A gate on the given qubits, in operand order (control first).
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    /// Measure one qubit into one classical bit.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self::measure_pairs([(qubit, clbit)])
    }

    /// Measure several qubits at once, pairing each with its target bit.
    pub fn measure_pairs(pairs: impl IntoIterator<Item = (QubitId, ClbitId)>) -> Self {
        let (qubits, clbits) = pairs.into_iter().unzip();
        Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        }
    }

    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    pub fn is_measure(&self) -> bool {
        self.kind == InstructionKind::Measure
    }

    pub fn is_barrier(&self) -> bool {
        self.kind == InstructionKind::Barrier
    }

    /// The gate, for gate instructions.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        if let InstructionKind::Gate(gate) = &self.kind {
            Some(gate)
        } else {
            None
        }
    }

    /// Gate name, or `measure` / `barrier`.
    pub fn name(&self) -> &str {
        self.as_gate().map_or_else(
            || if self.is_measure() { "measure" } else { "barrier" },
            StandardGate::name,
        )
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            InstructionKind::Gate(gate) => write!(f, "{gate} {}", join(&self.qubits)),
            InstructionKind::Measure => {
                write!(f, "measure {} -> {}", join(&self.qubits), join(&self.clbits))
            }
            InstructionKind::Barrier => write!(f, "barrier {}", join(&self.qubits)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_operands_keep_order() {
        let inst = Instruction::gate(StandardGate::CX, [QubitId(1), QubitId(0)]);
        assert_eq!(inst.qubits, vec![QubitId(1), QubitId(0)]);
        assert!(inst.clbits.is_empty());
        assert_eq!(inst.as_gate(), Some(&StandardGate::CX));
        assert_eq!(inst.to_string(), "cx q1, q0");
    }

    #[test]
    fn test_measure_pairs() {
        let inst = Instruction::measure_pairs([
            (QubitId(0), ClbitId(1)),
            (QubitId(2), ClbitId(0)),
        ]);
        assert!(inst.is_measure());
        assert_eq!(inst.name(), "measure");
        assert_eq!(inst.to_string(), "measure q0, q2 -> c1, c0");
    }

    #[test]
    fn test_barrier_has_no_gate() {
        let inst = Instruction::barrier([QubitId(0), QubitId(1)]);
        assert!(inst.is_barrier());
        assert!(inst.as_gate().is_none());
        assert_eq!(inst.name(), "barrier");
        assert_eq!(inst.to_string(), "barrier q0, q1");
    }
}
