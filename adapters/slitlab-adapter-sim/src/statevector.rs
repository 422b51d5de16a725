//! Dense statevector with in-place gate application.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

use num_complex::Complex64;
use rand::Rng;

use slitlab_ir::StandardGate;

type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];
const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]];

fn diagonal(d0: Complex64, d1: Complex64) -> Matrix2 {
    [[d0, ZERO], [ZERO, d1]]
}

fn phase(theta: f64) -> Matrix2 {
    diagonal(ONE, Complex64::from_polar(1.0, theta))
}

fn real(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// Unitary of a single-qubit gate, `None` for two-qubit gates.
fn single_qubit_matrix(gate: StandardGate) -> Option<Matrix2> {
    let m = match gate {
        StandardGate::I => diagonal(ONE, ONE),
        StandardGate::X => PAULI_X,
        StandardGate::Y => [[ZERO, -Complex64::i()], [Complex64::i(), ZERO]],
        StandardGate::Z => PAULI_Z,
        StandardGate::H => {
            let h = real(FRAC_1_SQRT_2);
            [[h, h], [h, -h]]
        }
        StandardGate::S => phase(FRAC_PI_2),
        StandardGate::Sdg => phase(-FRAC_PI_2),
        StandardGate::T => phase(FRAC_PI_4),
        StandardGate::Tdg => phase(-FRAC_PI_4),
        StandardGate::Rx(theta) => {
            let (s, c) = (theta / 2.0).sin_cos();
            let off = Complex64::new(0.0, -s);
            [[real(c), off], [off, real(c)]]
        }
        StandardGate::Ry(theta) => {
            let (s, c) = (theta / 2.0).sin_cos();
            [[real(c), real(-s)], [real(s), real(c)]]
        }
        StandardGate::Rz(theta) => diagonal(
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::from_polar(1.0, theta / 2.0),
        ),
        StandardGate::CX | StandardGate::CZ | StandardGate::Swap => return None,
    };
    Some(m)
}

/// Amplitudes of an `n`-qubit register.
///
/// Bit `k` of a basis index is the value of qubit `k`.
#[derive(Debug, Clone)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// |0…0⟩ on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self { amplitudes }
    }

    /// Apply `gate` to qubit indices in operand order (control first).
    ///
    /// The circuit builder guarantees the operand count matches the gate.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match (*gate, qubits) {
            (StandardGate::CX, &[control, target]) => {
                self.apply_matrix(target, &PAULI_X, 1 << control);
            }
            (StandardGate::CZ, &[control, target]) => {
                self.apply_matrix(target, &PAULI_Z, 1 << control);
            }
            (StandardGate::Swap, &[a, b]) => self.swap_qubits(a, b),
            (gate, &[target]) => {
                if let Some(m) = single_qubit_matrix(gate) {
                    self.apply_matrix(target, &m, 0);
                }
            }
            _ => {}
        }
    }

    /// Apply `m` to `target` on every basis state where all `controls` bits are set.
    fn apply_matrix(&mut self, target: usize, m: &Matrix2, controls: usize) {
        let bit = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & bit != 0 || i & controls != controls {
                continue;
            }
            let j = i | bit;
            let (a, b) = (self.amplitudes[i], self.amplitudes[j]);
            self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
            self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
        }
    }

    fn swap_qubits(&mut self, a: usize, b: usize) {
        let (bit_a, bit_b) = (1 << a, 1 << b);
        for i in 0..self.amplitudes.len() {
            if i & bit_a != 0 && i & bit_b == 0 {
                self.amplitudes.swap(i, i ^ bit_a ^ bit_b);
            }
        }
    }

    /// Probability of reading `qubit` as 1.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let bit = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & bit != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Measure `qubit` and project the state onto the result.
    pub fn measure<R: Rng>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let p_one = self.probability_one(qubit);
        let outcome = rng.r#gen::<f64>() < p_one;

        let bit = 1 << qubit;
        let norm = if outcome { p_one } else { 1.0 - p_one }.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & bit != 0) != outcome {
                *amp = ZERO;
            } else if norm > 0.0 {
                *amp /= norm;
            }
        }
        outcome
    }

    /// Draw a basis index from the Born distribution; the state is unchanged.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let mut remaining: f64 = rng.r#gen();
        let mut last_nonzero = 0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p > 0.0 {
                last_nonzero = i;
            }
            if remaining < p {
                return i;
            }
            remaining -= p;
        }
        // Rounding left a sliver of probability mass unassigned.
        last_nonzero
    }
}
