//! State and process tomography pulses.
//!
//! State tomography appends a pre-rotation that maps the measured Pauli
//! basis onto Z before readout. Process tomography prepends a preparation
//! pulse that brings each qubit from |0⟩ into one of four input states.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{IrError, IrResult};
use crate::gate::{Axis, Gate};
use crate::sequence::Sequence;
use crate::step::Placement;

/// Measurement basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliBasis {
    /// σx
    X,
    /// σy
    Y,
    /// σz
    Z,
}

impl PauliBasis {
    /// All bases, in measurement order.
    pub const ALL: [PauliBasis; 3] = [PauliBasis::Z, PauliBasis::Y, PauliBasis::X];

    /// Gate rotating this basis onto Z.
    pub fn pre_rotation(self) -> Gate {
        match self {
            PauliBasis::Z => Gate::identity(),
            PauliBasis::Y => Gate::rotation(Axis::X, FRAC_PI_2),
            PauliBasis::X => Gate::rotation(Axis::Y, -FRAC_PI_2),
        }
    }
}

/// Input state of process tomography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrepState {
    /// |0⟩
    #[serde(rename = "0")]
    Zero,
    /// |1⟩
    #[serde(rename = "1")]
    One,
    /// (|0⟩ + |1⟩)/√2
    #[serde(rename = "+")]
    Plus,
    /// (|0⟩ + i|1⟩)/√2
    #[serde(rename = "+i")]
    PlusI,
}

impl PrepState {
    /// All input states.
    pub const ALL: [PrepState; 4] = [
        PrepState::Zero,
        PrepState::One,
        PrepState::Plus,
        PrepState::PlusI,
    ];

    /// Gate preparing this state from |0⟩.
    pub fn preparation(self) -> Gate {
        match self {
            PrepState::Zero => Gate::identity(),
            PrepState::One => Gate::rotation(Axis::X, PI),
            PrepState::Plus => Gate::rotation(Axis::Y, FRAC_PI_2),
            PrepState::PlusI => Gate::rotation(Axis::X, -FRAC_PI_2),
        }
    }
}

fn check_qubits(qubits: &[usize], settings: usize) -> IrResult<()> {
    if qubits.is_empty() || qubits.len() > 2 {
        return Err(IrError::InvalidParameter {
            name: "qubits",
            reason: format!("tomography supports one or two qubits, got {}", qubits.len()),
        });
    }
    if settings != qubits.len() {
        return Err(IrError::GateCountMismatch {
            qubits: qubits.len(),
            gates: settings,
        });
    }
    Ok(())
}

/// State tomography on one or two qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTomography {
    /// Measured qubits.
    pub qubits: Vec<usize>,
    /// Basis per measured qubit.
    pub bases: Vec<PauliBasis>,
}

impl StateTomography {
    /// Create a tomography setting.
    pub fn new(qubits: Vec<usize>, bases: Vec<PauliBasis>) -> IrResult<Self> {
        check_qubits(&qubits, bases.len())?;
        Ok(Self { qubits, bases })
    }

    /// Every basis combination for `qubits`, first qubit slowest.
    pub fn all_settings(qubits: &[usize]) -> IrResult<Vec<Self>> {
        check_qubits(qubits, qubits.len())?;
        let mut settings: Vec<Vec<PauliBasis>> = vec![vec![]];
        for _ in qubits {
            settings = settings
                .into_iter()
                .flat_map(|prefix| {
                    PauliBasis::ALL.into_iter().map(move |b| {
                        let mut next = prefix.clone();
                        next.push(b);
                        next
                    })
                })
                .collect();
        }
        Ok(settings
            .into_iter()
            .map(|bases| Self {
                qubits: qubits.to_vec(),
                bases,
            })
            .collect())
    }

    /// Append the pre-rotations as one step.
    pub fn add_pulses(&self, seq: &mut Sequence) -> IrResult<()> {
        check_qubits(&self.qubits, self.bases.len())?;
        let gates = self.bases.iter().map(|b| b.pre_rotation()).collect();
        seq.add_gate_at(&self.qubits, gates, Placement::default())?;
        Ok(())
    }
}

/// Process tomography input preparation on one or two qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTomography {
    /// Prepared qubits.
    pub qubits: Vec<usize>,
    /// Input state per prepared qubit.
    pub states: Vec<PrepState>,
}

impl ProcessTomography {
    /// Create a preparation setting.
    pub fn new(qubits: Vec<usize>, states: Vec<PrepState>) -> IrResult<Self> {
        check_qubits(&qubits, states.len())?;
        Ok(Self { qubits, states })
    }

    /// Append the preparation pulses as one step.
    pub fn add_pulses(&self, seq: &mut Sequence) -> IrResult<()> {
        check_qubits(&self.qubits, self.states.len())?;
        let gates = self.states.iter().map(|s| s.preparation()).collect();
        seq.add_gate_at(&self.qubits, gates, Placement::default())?;
        Ok(())
    }
}
