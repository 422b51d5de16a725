//! Static circuit descriptions.

use serde::Serialize;
use slitlab_ir::{Circuit, ClbitId, IrResult, QubitId, StandardGate};

/// Number of trials per circuit.
pub const SHOTS: u32 = 2048;

/// One gate applied to the listed qubit indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Operation {
    /// The gate.
    pub gate: StandardGate,
    /// Target qubit indices, control first for controlled gates.
    pub targets: &'static [u32],
}

impl Operation {
    /// Create an operation.
    pub const fn new(gate: StandardGate, targets: &'static [u32]) -> Self {
        Self { gate, targets }
    }
}

/// An immutable circuit description: gates in order, then measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircuitSpec {
    /// Short identifier, used in logs and errors.
    pub name: &'static str,
    /// Number of qubits.
    pub num_qubits: u32,
    /// Number of classical bits.
    pub num_clbits: u32,
    /// Gate sequence.
    pub operations: &'static [Operation],
    /// `(qubit, clbit)` pairs measured after the gates.
    pub measurements: &'static [(u32, u32)],
}

impl CircuitSpec {
    /// A single path qubit put through two Hadamards. The paths recombine
    /// and interfere constructively on `|0⟩`.
    pub const INTERFERENCE: CircuitSpec = CircuitSpec {
        name: "interference",
        num_qubits: 1,
        num_clbits: 1,
        operations: &[
            Operation::new(StandardGate::H, &[0]),
            Operation::new(StandardGate::H, &[0]),
        ],
        measurements: &[(0, 0)],
    };

    /// The path qubit is entangled with a marker qubit between the two
    /// Hadamards, recording which path was taken. Interference is lost.
    pub const OBSERVER: CircuitSpec = CircuitSpec {
        name: "observer",
        num_qubits: 2,
        num_clbits: 1,
        operations: &[
            Operation::new(StandardGate::H, &[0]),
            Operation::new(StandardGate::CX, &[0, 1]),
            Operation::new(StandardGate::H, &[0]),
        ],
        measurements: &[(0, 0)],
    };

    /// Build the IR circuit.
    pub fn to_circuit(&self) -> IrResult<Circuit> {
        let mut circuit = Circuit::with_size(self.name, self.num_qubits, self.num_clbits);
        for op in self.operations {
            circuit.gate(op.gate, op.targets.iter().copied().map(QubitId))?;
        }
        for &(qubit, clbit) in self.measurements {
            circuit.measure(QubitId(qubit), ClbitId(clbit))?;
        }
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slitlab_ir::IrError;

    #[test]
    fn test_interference_circuit() {
        let circuit = CircuitSpec::INTERFERENCE.to_circuit().unwrap();
        assert_eq!(circuit.name(), "interference");
        assert_eq!(circuit.num_qubits(), 1);
        assert_eq!(circuit.num_clbits(), 1);
        assert_eq!(circuit.num_ops(), 3);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_observer_circuit() {
        let circuit = CircuitSpec::OBSERVER.to_circuit().unwrap();
        let names: Vec<&str> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["h", "cx", "h", "measure"]);
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 1);
    }

    #[test]
    fn test_bad_spec_is_rejected() {
        const BROKEN: CircuitSpec = CircuitSpec {
            name: "broken",
            num_qubits: 1,
            num_clbits: 1,
            operations: &[Operation::new(StandardGate::CX, &[0, 1])],
            measurements: &[],
        };
        assert!(matches!(
            BROKEN.to_circuit(),
            Err(IrError::QubitNotFound { .. })
        ));
    }
}
