//! Sequence building.

use qpulse_pulse::Pulse;
use tracing::trace;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::step::{Placement, Step};

/// Largest number of qubits the scheduler handles.
pub const MAX_QUBIT: usize = 9;

/// An ordered list of steps over a fixed number of qubits.
///
/// Built incrementally with the `add_*` methods, then handed to the compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    n_qubit: usize,
    steps: Vec<Step>,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn new(n_qubit: usize) -> IrResult<Self> {
        if n_qubit == 0 {
            return Err(IrError::NoQubits);
        }
        if n_qubit > MAX_QUBIT {
            return Err(IrError::QubitCountExceeded {
                requested: n_qubit,
                max: MAX_QUBIT,
            });
        }
        Ok(Self {
            n_qubit,
            steps: vec![],
        })
    }

    /// Number of qubits.
    pub fn n_qubit(&self) -> usize {
        self.n_qubit
    }

    /// The steps, in insertion order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps have been added.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Add gates to qubits as one step, with default timing.
    ///
    /// See [`add_gate_at`](Self::add_gate_at).
    pub fn add_gate(&mut self, qubits: &[usize], gates: Vec<Gate>) -> IrResult<&mut Self> {
        self.add_gate_at(qubits, gates, Placement::default())
    }

    /// Add gates to qubits.
    ///
    /// A composite gate consumes as many consecutive entries of `qubits` as
    /// it spans. Plain gates produce one step. Composites expand into one step
    /// per row; all composites in the call must have the same number of rows,
    /// and plain gates in the same call land in the first row only. The
    /// placement applies to the first expanded step.
    pub fn add_gate_at(
        &mut self,
        qubits: &[usize],
        gates: Vec<Gate>,
        placement: Placement,
    ) -> IrResult<&mut Self> {
        let spanned: usize = gates.iter().map(Gate::num_qubits).sum();
        if spanned != qubits.len() {
            return Err(IrError::GateCountMismatch {
                qubits: qubits.len(),
                gates: spanned,
            });
        }
        if let Some(&qubit) = qubits.iter().find(|&&q| q >= self.n_qubit) {
            return Err(IrError::QubitOutOfRange {
                qubit,
                n_qubit: self.n_qubit,
            });
        }

        let mut rows = None;
        for gate in &gates {
            if let Gate::Composite(c) = gate {
                match rows {
                    None => rows = Some(c.len()),
                    Some(expected) if expected != c.len() => {
                        return Err(IrError::CompositeLengthMismatch {
                            expected,
                            got: c.len(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        let Some(rows) = rows else {
            let mut step = Step::new(self.n_qubit, placement);
            for (&q, gate) in qubits.iter().zip(gates) {
                step.set(q, gate);
            }
            self.steps.push(step);
            return Ok(self);
        };

        trace!(rows, "expanding composite gates");
        for row in 0..rows {
            let row_placement = if row == 0 { placement } else { Placement::default() };
            let mut step = Step::new(self.n_qubit, row_placement);
            let mut cursor = 0;
            for gate in &gates {
                let span = gate.num_qubits();
                let targets = &qubits[cursor..cursor + span];
                cursor += span;
                match gate {
                    Gate::Composite(c) => {
                        if let Some(row_gates) = c.row(row) {
                            for (&q, g) in targets.iter().zip(row_gates) {
                                step.set(q, g.clone());
                            }
                        }
                    }
                    plain if row == 0 => step.set(targets[0], plain.clone()),
                    _ => {}
                }
            }
            self.steps.push(step);
        }
        Ok(self)
    }

    /// Add one gate to one qubit.
    pub fn add_single(&mut self, qubit: usize, gate: Gate) -> IrResult<&mut Self> {
        self.add_gate(&[qubit], vec![gate])
    }

    /// Add an explicit pulse to one qubit.
    pub fn add_pulse(
        &mut self,
        qubit: usize,
        pulse: Pulse,
        placement: Placement,
    ) -> IrResult<&mut Self> {
        self.add_gate_at(&[qubit], vec![Gate::custom(pulse)], placement)
    }

    /// Add the same gate to every qubit in one step.
    pub fn add_gate_to_all(&mut self, gate: Gate, placement: Placement) -> IrResult<&mut Self> {
        let span = gate.num_qubits();
        if span != 1 {
            return Err(IrError::GateCountMismatch {
                qubits: self.n_qubit,
                gates: span * self.n_qubit,
            });
        }
        let qubits: Vec<usize> = (0..self.n_qubit).collect();
        self.add_gate_at(&qubits, vec![gate; self.n_qubit], placement)
    }

    /// Add several steps, one per row; `None` leaves a qubit idle.
    pub fn add_gates(&mut self, rows: Vec<Vec<Option<Gate>>>) -> IrResult<&mut Self> {
        for row in rows {
            if row.len() > self.n_qubit {
                return Err(IrError::GateCountMismatch {
                    qubits: self.n_qubit,
                    gates: row.len(),
                });
            }
            let (qubits, gates): (Vec<usize>, Vec<Gate>) = row
                .into_iter()
                .enumerate()
                .filter_map(|(q, g)| g.map(|g| (q, g)))
                .unzip();
            self.add_gate(&qubits, gates)?;
        }
        Ok(self)
    }
}
