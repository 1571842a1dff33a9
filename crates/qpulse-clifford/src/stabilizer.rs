//! Stabilizer fingerprints of two-qubit states.
//!
//! A stabilizer state is identified by the signed two-qubit Paulis with
//! expectation value +1. The fingerprint is used as the key of the
//! recovery table.

use num_complex::Complex64;

use crate::unitary::{TOLERANCE, Unitary2x2, Unitary4x4};

const PAULI_NAMES: [char; 4] = ['I', 'X', 'Y', 'Z'];

fn pauli(k: usize) -> Unitary2x2 {
    let (o, z, i) = (
        Complex64::new(1.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 1.0),
    );
    match k {
        0 => Unitary2x2::new(o, z, z, o),
        1 => Unitary2x2::new(z, o, o, z),
        2 => Unitary2x2::new(z, -i, i, z),
        _ => Unitary2x2::new(o, z, z, -o),
    }
}

fn expectation(op: &Unitary4x4, state: &[Complex64; 4]) -> Complex64 {
    let mut acc = Complex64::new(0.0, 0.0);
    for r in 0..4 {
        let row: Complex64 = (0..4).map(|c| op.data[r * 4 + c] * state[c]).sum();
        acc += state[r].conj() * row;
    }
    acc
}

/// Labels like `+IX` or `-ZZ` of every signed Pauli stabilizing `state`.
///
/// Order is fixed: sign `+` before `-`, then first-qubit Pauli, then second,
/// each in `I X Y Z` order.
pub fn fingerprint(state: &[Complex64; 4]) -> Vec<String> {
    let mut labels = Vec::new();
    for (sign, prefix) in [(1.0, '+'), (-1.0, '-')] {
        for p1 in 0..4 {
            for p2 in 0..4 {
                let op = Unitary4x4::kron(&pauli(p1), &pauli(p2));
                let e = expectation(&op, state) * sign;
                if (e - Complex64::new(1.0, 0.0)).norm() < TOLERANCE {
                    labels.push(format!("{prefix}{}{}", PAULI_NAMES[p1], PAULI_NAMES[p2]));
                }
            }
        }
    }
    labels
}

/// Table key for `state`: the fingerprint joined with commas.
pub fn key(state: &[Complex64; 4]) -> String {
    fingerprint(state).join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_state() {
        let ground = Unitary4x4::identity().first_column();
        assert_eq!(fingerprint(&ground), vec!["+II", "+IZ", "+ZI", "+ZZ"]);
    }

    #[test]
    fn test_bell_state() {
        let h = 1.0 / 2f64.sqrt();
        let bell = [
            Complex64::new(h, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(h, 0.0),
        ];
        assert_eq!(key(&bell), "+II,+XX,+ZZ,-YY");
    }

    #[test]
    fn test_global_phase_ignored() {
        let flipped = Unitary4x4::kron(&Unitary2x2::rx(std::f64::consts::PI), &Unitary2x2::identity());
        let state = flipped.first_column();
        assert_eq!(key(&state), "+II,+IZ,-ZI,-ZZ");
    }
}
