//! Scheduling units.

use serde::{Deserialize, Serialize};

use crate::gate::Gate;

/// Where a shorter gate sits inside a longer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Starts with the step.
    Left,
    /// Centered in the step.
    #[default]
    Center,
    /// Ends with the step.
    Right,
}

/// Timing request for a step.
///
/// With neither field set the step follows the previous one after the
/// compiler's default spacing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// Absolute center of the step, in seconds.
    pub t0: Option<f64>,
    /// Spacing after the previous step, in seconds.
    pub dt: Option<f64>,
    /// Alignment of shorter gates.
    pub align: Alignment,
}

impl Placement {
    /// Anchor the step center at `t0`.
    pub fn at(t0: f64) -> Self {
        Self {
            t0: Some(t0),
            ..Self::default()
        }
    }

    /// Place the step `dt` after the previous one.
    pub fn after(dt: f64) -> Self {
        Self {
            dt: Some(dt),
            ..Self::default()
        }
    }

    /// Set the alignment.
    #[must_use]
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

/// One gate slot per qubit plus a timing request.
///
/// Empty slots are filled with zero-width identities by the compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    gates: Vec<Option<Gate>>,
    placement: Placement,
}

impl Step {
    pub(crate) fn new(n_qubit: usize, placement: Placement) -> Self {
        Self {
            gates: vec![None; n_qubit],
            placement,
        }
    }

    pub(crate) fn set(&mut self, qubit: usize, gate: Gate) {
        self.gates[qubit] = Some(gate);
    }

    /// Gate slots, one per qubit.
    pub fn gates(&self) -> &[Option<Gate>] {
        &self.gates
    }

    /// Gate on `qubit`, if any.
    pub fn gate(&self, qubit: usize) -> Option<&Gate> {
        self.gates.get(qubit).and_then(Option::as_ref)
    }

    /// Timing request.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Number of qubit slots.
    pub fn n_qubit(&self) -> usize {
        self.gates.len()
    }

    /// Whether any slot holds a readout gate.
    pub fn has_readout(&self) -> bool {
        self.gates.iter().flatten().any(Gate::is_readout)
    }

    /// Whether every occupied slot holds an identity.
    pub fn is_identity_only(&self) -> bool {
        self.gates.iter().flatten().all(Gate::is_identity)
    }

    /// Copy of this step keeping only the slot of `qubit`.
    pub fn isolate(&self, qubit: usize) -> Step {
        let mut step = Step::new(self.n_qubit(), self.placement);
        if let Some(g) = self.gate(qubit) {
            step.set(qubit, g.clone());
        }
        step
    }
}
