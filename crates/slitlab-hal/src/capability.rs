//! Backend capability introspection.
//!
//! Describes what a backend can run: qubit count, supported gates and the
//! shot limit. Backends cache their [`Capabilities`] at construction time
//! and the compile step checks circuits against them.

use serde::{Deserialize, Serialize};
use slitlab_ir::StandardGate;

/// Capabilities of a quantum backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Maximum number of shots per execution.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
}

impl Capabilities {
    /// Create capabilities for a statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            max_shots: 100_000,
            is_simulator: true,
        }
    }

    /// Set the backend name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Set of gates a backend accepts, by lowercase gate name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateSet {
    /// Supported single-qubit gates.
    pub single_qubit: Vec<String>,
    /// Supported two-qubit gates.
    pub two_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate in the IR.
    pub fn universal() -> Self {
        Self::from_names(
            &["id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "rx", "ry", "rz"],
            &["cx", "cz", "swap"],
        )
    }

    /// Clifford-only gate set.
    pub fn clifford() -> Self {
        Self::from_names(&["id", "x", "y", "z", "h", "s", "sdg"], &["cx", "cz", "swap"])
    }

    fn from_names(single: &[&str], two: &[&str]) -> Self {
        Self {
            single_qubit: single.iter().map(ToString::to_string).collect(),
            two_qubit: two.iter().map(ToString::to_string).collect(),
        }
    }

    /// Check if a gate is supported at its arity.
    pub fn supports(&self, gate: &StandardGate) -> bool {
        let name = gate.name();
        match gate.num_qubits() {
            1 => self.single_qubit.iter().any(|g| g == name),
            2 => self.two_qubit.iter().any(|g| g == name),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(10);
        assert_eq!(caps.num_qubits, 10);
        assert_eq!(caps.max_shots, 100_000);
        assert!(caps.is_simulator);
        assert!(caps.gate_set.supports(&StandardGate::H));
        assert!(caps.gate_set.supports(&StandardGate::Swap));
    }

    #[test]
    fn test_builder_overrides() {
        let caps = Capabilities::simulator(2).with_name("tiny");
        assert_eq!(caps.name, "tiny");
        assert_eq!(caps.num_qubits, 2);
    }

    #[test]
    fn test_gate_set_supports() {
        let clifford = GateSet::clifford();
        assert!(clifford.supports(&StandardGate::H));
        assert!(clifford.supports(&StandardGate::CX));
        assert!(!clifford.supports(&StandardGate::T));
        assert!(!clifford.supports(&StandardGate::Ry(0.1)));
        assert!(clifford.supports(&StandardGate::CZ));
    }

    #[test]
    fn test_capabilities_serde() {
        let caps = Capabilities::simulator(4);
        let json = serde_json::to_string(&caps).unwrap();
        let back: Capabilities = serde_json::from_str(&json).unwrap();
        assert_eq!(caps, back);
    }
}
