//! Fixed-size unitary matrices for Clifford evaluation.
//!
//! Provides 2x2 and 4x4 complex matrices with the products, adjoints and
//! identity-up-to-phase test used by the recovery search. Two-qubit matrices
//! use the basis order |q1 q2⟩ with q1 the most significant bit.

use num_complex::Complex64;

/// Tolerance for identity and unitarity checks.
pub const TOLERANCE: f64 = 1e-6;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Identity up to a global phase: every diagonal entry has unit modulus and
/// equals the first one.
fn diagonal_is_identity(diagonal: impl Iterator<Item = Complex64> + Clone) -> bool {
    let Some(d0) = diagonal.clone().next() else {
        return false;
    };
    diagonal.into_iter().all(|d| {
        (d.norm() - 1.0).abs() < TOLERANCE && (d / d0 - ONE).norm() < TOLERANCE
    })
}

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Create an RX rotation matrix.
    pub fn rx(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Check if this is the identity up to a global phase.
    pub fn is_identity(&self) -> bool {
        diagonal_is_identity([self.data[0], self.data[3]].into_iter())
    }

    /// Amplitude of |0⟩ after applying this matrix to |0⟩.
    pub fn ground_amplitude(&self) -> Complex64 {
        self.data[0]
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

/// A 4x4 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary4x4 {
    /// The matrix elements in row-major order.
    pub data: [Complex64; 16],
}

impl Unitary4x4 {
    /// Create the identity matrix.
    pub fn identity() -> Self {
        let mut data = [ZERO; 16];
        for i in 0..4 {
            data[i * 4 + i] = ONE;
        }
        Self { data }
    }

    /// Kronecker product `a ⊗ b`, `a` acting on the first qubit.
    pub fn kron(a: &Unitary2x2, b: &Unitary2x2) -> Self {
        let mut data = [ZERO; 16];
        for i in 0..4 {
            for j in 0..4 {
                data[i * 4 + j] = a.data[(i / 2) * 2 + j / 2] * b.data[(i % 2) * 2 + j % 2];
            }
        }
        Self { data }
    }

    /// Controlled-phase: diag(1, 1, 1, -1).
    pub fn cz() -> Self {
        let mut m = Self::identity();
        m.data[15] = -ONE;
        m
    }

    /// iSWAP: swaps |01⟩ and |10⟩ with a phase of i.
    pub fn iswap() -> Self {
        let i = Complex64::new(0.0, 1.0);
        let mut data = [ZERO; 16];
        data[0] = ONE;
        data[6] = i;
        data[9] = i;
        data[15] = ONE;
        Self { data }
    }

    /// Multiply this matrix by another: self * other.
    pub fn mul(&self, other: &Self) -> Self {
        let mut data = [ZERO; 16];
        for i in 0..4 {
            for j in 0..4 {
                data[i * 4 + j] = (0..4)
                    .map(|k| self.data[i * 4 + k] * other.data[k * 4 + j])
                    .sum();
            }
        }
        Self { data }
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        let mut data = [ZERO; 16];
        for i in 0..4 {
            for j in 0..4 {
                data[i * 4 + j] = self.data[j * 4 + i].conj();
            }
        }
        Self { data }
    }

    /// Check if this is the identity up to a global phase.
    pub fn is_identity(&self) -> bool {
        diagonal_is_identity((0..4).map(|i| self.data[i * 4 + i]))
    }

    /// Check `U†U = I` within tolerance.
    pub fn is_unitary(&self) -> bool {
        let p = self.dagger().mul(self);
        (0..16).all(|k| {
            let expected = if k % 5 == 0 { ONE } else { ZERO };
            (p.data[k] - expected).norm() < TOLERANCE
        })
    }

    /// The state this matrix produces from |00⟩.
    pub fn first_column(&self) -> [Complex64; 4] {
        [self.data[0], self.data[4], self.data[8], self.data[12]]
    }

    /// Amplitude of |00⟩ after applying this matrix to `state`.
    pub fn ground_amplitude(&self, state: &[Complex64; 4]) -> Complex64 {
        (0..4).map(|j| self.data[j] * state[j]).sum()
    }
}

impl Default for Unitary4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary4x4 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary4x4::mul(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identity() {
        assert!(Unitary2x2::identity().is_identity());
        assert!(Unitary4x4::identity().is_identity());
    }

    #[test]
    fn test_global_phase_is_ignored() {
        // Rx(2π) = -I
        assert!(Unitary2x2::rx(2.0 * PI).is_identity());
        assert!(!Unitary2x2::rx(PI).is_identity());
        // Z = diag(1, -1) is not the identity
        assert!(!(Unitary2x2::rx(PI) * Unitary2x2::ry(PI)).is_identity());
    }

    #[test]
    fn test_rotation_squared() {
        let x2 = Unitary2x2::rx(PI / 2.0);
        let y2 = Unitary2x2::ry(PI / 2.0);
        assert!((x2 * x2 * x2 * x2).is_identity());
        assert!((y2 * y2.dagger()).is_identity());
    }

    #[test]
    fn test_entanglers() {
        let cz = Unitary4x4::cz();
        assert!((cz * cz).is_identity());
        let iswap = Unitary4x4::iswap();
        assert!(iswap.is_unitary());
        assert!(!(iswap * iswap).is_identity());
        assert!((iswap * iswap * iswap * iswap).is_identity());
    }

    #[test]
    fn test_kron_order() {
        // X on the first qubit maps |00⟩ to |10⟩ (index 2)
        let m = Unitary4x4::kron(&Unitary2x2::rx(PI), &Unitary2x2::identity());
        let psi = m.first_column();
        assert!(psi[2].norm() > 1.0 - 1e-12);
        assert!(psi[1].norm() < 1e-12);
        assert!(m.is_unitary());
    }
}
