//! Composite gates: short gate programs over a fixed tuple of qubits.

use crate::error::{IrError, IrResult};
use crate::gate::{Axis, Gate};
use crate::tomography::PauliBasis;
use std::f64::consts::{FRAC_PI_2, PI};

/// Ordered rows of gates, one gate per spanned qubit in every row.
///
/// Composites are expanded into ordinary steps when they are added to a
/// [`Sequence`](crate::Sequence).
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeGate {
    n_qubit: usize,
    rows: Vec<Vec<Gate>>,
}

impl CompositeGate {
    /// Create a composite; every row must have exactly `n_qubit` gates.
    pub fn new(n_qubit: usize, rows: Vec<Vec<Gate>>) -> IrResult<Self> {
        for (row, gates) in rows.iter().enumerate() {
            if gates.len() != n_qubit {
                return Err(IrError::CompositeRowWidth {
                    row,
                    expected: n_qubit,
                    got: gates.len(),
                });
            }
            if gates.iter().any(|g| matches!(g, Gate::Composite(_))) {
                return Err(IrError::NestedComposite);
            }
        }
        Ok(Self { n_qubit, rows })
    }

    /// Qubits spanned.
    pub fn n_qubit(&self) -> usize {
        self.n_qubit
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Gates of row `i`.
    pub fn row(&self, i: usize) -> Option<&[Gate]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<Gate>] {
        &self.rows
    }

    /// Copy with `angle` added to every inner gate.
    #[must_use]
    pub fn add_phase(&self, angle: f64) -> Self {
        Self {
            n_qubit: self.n_qubit,
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|g| g.add_phase(angle)).collect())
                .collect(),
        }
    }

    /// Controlled phase followed by single-qubit virtual-Z corrections.
    pub fn cz(phi1: f64, phi2: f64) -> Self {
        Self {
            n_qubit: 2,
            rows: vec![
                vec![Gate::cz(), Gate::identity()],
                vec![Gate::virtual_z(phi1), Gate::virtual_z(phi2)],
            ],
        }
    }

    /// Echoed controlled phase.
    pub fn cz_echo() -> Self {
        let x2p = Gate::rotation(Axis::X, FRAC_PI_2);
        let xp = Gate::rotation(Axis::X, PI);
        Self {
            n_qubit: 2,
            rows: vec![
                vec![x2p.clone(), Gate::identity()],
                vec![Gate::cz(), Gate::identity()],
                vec![xp.clone(), xp.clone()],
                vec![Gate::cz(), Gate::identity()],
                vec![x2p, xp],
            ],
        }
    }

    /// CNOT from a controlled phase and target rotations.
    pub fn cnot() -> Self {
        Self {
            n_qubit: 2,
            rows: vec![
                vec![Gate::identity(), Gate::rotation(Axis::Y, -FRAC_PI_2)],
                vec![Gate::cz(), Gate::identity()],
                vec![Gate::identity(), Gate::rotation(Axis::Y, FRAC_PI_2)],
            ],
        }
    }

    /// Pre-rotation mapping `basis` (positive or negative eigenstate) onto Z,
    /// followed by readout.
    pub fn measurement(basis: PauliBasis, positive: bool) -> Self {
        let rotation = match (basis, positive) {
            (PauliBasis::Z, true) => Gate::identity(),
            (PauliBasis::Z, false) => Gate::rotation(Axis::X, PI),
            (PauliBasis::Y, true) => Gate::rotation(Axis::X, FRAC_PI_2),
            (PauliBasis::Y, false) => Gate::rotation(Axis::X, -FRAC_PI_2),
            (PauliBasis::X, true) => Gate::rotation(Axis::Y, -FRAC_PI_2),
            (PauliBasis::X, false) => Gate::rotation(Axis::Y, FRAC_PI_2),
        };
        Self {
            n_qubit: 1,
            rows: vec![vec![rotation], vec![Gate::readout()]],
        }
    }
}

impl From<CompositeGate> for Gate {
    fn from(composite: CompositeGate) -> Self {
        Gate::Composite(composite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_width_checked() {
        let err = CompositeGate::new(2, vec![vec![Gate::identity()]]).unwrap_err();
        assert!(matches!(
            err,
            IrError::CompositeRowWidth { row: 0, expected: 2, got: 1 }
        ));
    }

    #[test]
    fn test_nested_rejected() {
        let inner = Gate::Composite(CompositeGate::cnot());
        let err = CompositeGate::new(1, vec![vec![inner]]).unwrap_err();
        assert!(matches!(err, IrError::NestedComposite));
    }

    #[test]
    fn test_builtin_shapes() {
        assert_eq!(CompositeGate::cz_echo().len(), 5);
        assert_eq!(CompositeGate::cnot().len(), 3);
        assert_eq!(CompositeGate::cz(0.1, 0.2).row(1).unwrap()[1], Gate::virtual_z(0.2));
        let m = CompositeGate::measurement(PauliBasis::X, true);
        assert_eq!(m.n_qubit(), 1);
        assert_eq!(m.row(1).unwrap()[0], Gate::readout());
    }

    #[test]
    fn test_add_phase_reaches_inner_gates() {
        let shifted = CompositeGate::cnot().add_phase(0.5);
        match &shifted.row(0).unwrap()[1] {
            Gate::Rotation { phase_shift, .. } => assert_eq!(*phase_shift, 0.5),
            other => panic!("unexpected {other:?}"),
        }
    }
}
