//! Flux crosstalk compensation.
//!
//! With crosstalk matrix `M`, the flux seen by the qubits is `M · v` for
//! line voltages `v`. Compensation applies `M⁻¹` to the rendered flux
//! waveforms sample by sample, so that the qubits see the intended pulses.

use faer::Mat;
use faer::linalg::solvers::DenseSolveCore;

use crate::error::{CompileError, CompileResult};

/// Largest deviation of `M · M⁻¹` from the identity accepted as an inverse.
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Inverse of a square matrix through a partial-pivoting LU decomposition.
///
/// Singular or numerically degenerate matrices fail with
/// [`CompileError::SingularCrosstalk`].
pub fn invert(matrix: &[Vec<f64>]) -> CompileResult<Vec<Vec<f64>>> {
    let n = matrix.len();
    if matrix.iter().any(|row| row.len() != n) {
        return Err(CompileError::Configuration(
            "crosstalk matrix must be square".into(),
        ));
    }
    if n == 0 {
        return Ok(Vec::new());
    }
    let a = Mat::from_fn(n, n, |i, j| matrix[i][j]);
    let inverse = a.partial_piv_lu().inverse();

    let product = &a * &inverse;
    for i in 0..n {
        for j in 0..n {
            let expected = if i == j { 1.0 } else { 0.0 };
            let residual = (product[(i, j)] - expected).abs();
            // NaN from a zero pivot fails this comparison too
            if !(residual <= RESIDUAL_TOLERANCE) {
                return Err(CompileError::SingularCrosstalk);
            }
        }
    }
    Ok((0..n)
        .map(|i| (0..n).map(|j| inverse[(i, j)]).collect())
        .collect())
}

/// Apply `inverse` to the flux waveforms in place.
pub fn compensate(z: &mut [Vec<f64>], inverse: &[Vec<f64>]) {
    let n = z.len().min(inverse.len());
    let n_points = z.iter().map(Vec::len).min().unwrap_or(0);
    let mut column = vec![0.0; n];
    for k in 0..n_points {
        for (i, c) in column.iter_mut().enumerate() {
            *c = z[i][k];
        }
        for (i, row) in inverse.iter().enumerate().take(n) {
            z[i][k] = row.iter().zip(&column).map(|(m, v)| m * v).sum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_two_by_two() {
        let m = vec![vec![1.0, 0.1], vec![0.2, 1.0]];
        let inv = invert(&m).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let v: f64 = (0..2).map(|k| m[i][k] * inv[k][j]).sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_singular_rejected() {
        let m = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert!(matches!(invert(&m), Err(CompileError::SingularCrosstalk)));
    }

    #[test]
    fn test_invert_three_line_crosstalk() {
        let m = vec![
            vec![1.0, 0.03, -0.01],
            vec![0.05, 1.0, 0.02],
            vec![0.0, -0.04, 1.0],
        ];
        let inv = invert(&m).unwrap();
        assert_eq!(inv.len(), 3);
        for i in 0..3 {
            for j in 0..3 {
                let v: f64 = (0..3).map(|k| inv[i][k] * m[k][j]).sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-12, "({i},{j}) = {v}");
            }
        }
        // weak coupling: off-diagonal terms flip sign to first order
        assert!(inv[0][1] < 0.0);
        assert!(inv[2][1] > 0.0);
    }

    #[test]
    fn test_rank_deficient_three_lines_rejected() {
        // lines 1 and 2 are driven identically
        let m = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 1.0],
            vec![0.0, 1.0, 1.0],
        ];
        assert!(matches!(invert(&m), Err(CompileError::SingularCrosstalk)));
    }

    #[test]
    fn test_non_square_rejected() {
        let m = vec![vec![1.0, 0.0], vec![0.0]];
        assert!(matches!(invert(&m), Err(CompileError::Configuration(_))));
    }

    #[test]
    fn test_compensation_cancels_crosstalk() {
        let m = vec![vec![1.0, 0.05], vec![0.1, 1.0]];
        let inv = invert(&m).unwrap();
        let target = vec![vec![0.0, 0.4, 0.4, 0.0], vec![0.0, 0.0, 0.0, 0.0]];
        let mut z = target.clone();
        compensate(&mut z, &inv);
        // what the qubits see after crosstalk
        for k in 0..4 {
            for i in 0..2 {
                let seen: f64 = (0..2).map(|j| m[i][j] * z[j][k]).sum();
                assert!((seen - target[i][k]).abs() < 1e-12);
            }
        }
        assert!(z[1][1] < 0.0);
    }
}
