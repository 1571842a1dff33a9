//! Error types for the IR crate.

use thiserror::Error;

/// Errors raised while building gates and sequences.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// More qubits than the scheduler supports.
    #[error("Sequence requests {requested} qubits, at most {max} are supported")]
    QubitCountExceeded {
        /// Requested qubit count.
        requested: usize,
        /// Fixed upper bound.
        max: usize,
    },

    /// A sequence needs at least one qubit.
    #[error("Sequence must have at least one qubit")]
    NoQubits,

    /// The qubit list and the gate list of a single add call disagree.
    #[error("Length of qubit list ({qubits}) and gate list ({gates}) must be equal")]
    GateCountMismatch {
        /// Number of qubit slots addressed.
        qubits: usize,
        /// Number of qubit slots the gates span.
        gates: usize,
    },

    /// Qubit index outside the sequence.
    #[error("Qubit {qubit} is out of range for a {n_qubit}-qubit sequence")]
    QubitOutOfRange {
        /// Offending index.
        qubit: usize,
        /// Qubits in the sequence.
        n_qubit: usize,
    },

    /// Composite gates added together must have the same number of rows.
    #[error("Composite gates added together must have equal lengths: expected {expected}, got {got}")]
    CompositeLengthMismatch {
        /// Length of the first composite.
        expected: usize,
        /// Length of the mismatching composite.
        got: usize,
    },

    /// A composite row does not cover exactly the composite's qubits.
    #[error("Composite row {row} has {got} gates, composite spans {expected} qubits")]
    CompositeRowWidth {
        /// Row index.
        row: usize,
        /// Qubits spanned by the composite.
        expected: usize,
        /// Gates in the row.
        got: usize,
    },

    /// Composites cannot contain composites.
    #[error("Composite gates cannot be nested")]
    NestedComposite,

    /// No gate with this symbolic name.
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// A generator or tomography parameter is out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
