//! Circuit construction errors.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Why an instruction was rejected by a [`Circuit`](crate::Circuit).
///
/// `op` names the offending instruction when it is known.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    #[error("qubit {qubit} is outside the circuit{}", in_op(.op))]
    QubitNotFound { qubit: QubitId, op: Option<String> },

    #[error("classical bit {clbit} is outside the circuit{}", in_op(.op))]
    ClbitNotFound { clbit: ClbitId, op: Option<String> },

    /// The operand count does not match the gate's arity.
    #[error("gate '{gate}' acts on {expected} qubits, got {got}")]
    QubitCountMismatch { gate: String, expected: u32, got: u32 },

    /// The same qubit appears twice among one instruction's operands.
    #[error("qubit {qubit} used twice{}", in_op(.op))]
    DuplicateQubit { qubit: QubitId, op: Option<String> },

    /// A measurement lists a different number of qubits and classical bits.
    #[error("measurement maps {qubits} qubits onto {clbits} classical bits")]
    MeasureArity { qubits: usize, clbits: usize },
}

#[allow(clippy::ref_option)]
fn in_op(op: &Option<String>) -> String {
    op.as_deref()
        .map(|name| format!(" in '{name}'"))
        .unwrap_or_default()
}

pub type IrResult<T> = Result<T, IrError>;
