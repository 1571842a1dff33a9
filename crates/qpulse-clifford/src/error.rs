//! Error types for the Clifford crate.

use qpulse_ir::IrError;
use thiserror::Error;

/// Errors raised by Clifford decomposition, recovery search and tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliffordError {
    /// Clifford index outside the group.
    #[error("Clifford index {index} out of range (group has {size} elements)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Group size.
        size: usize,
    },

    /// No candidate returned the sequence to its initial state.
    ///
    /// The group is closed under inversion, so this indicates broken
    /// decomposition tables.
    #[error("No recovery found among {candidates} candidates")]
    NoRecovery {
        /// Number of candidates tried.
        candidates: usize,
    },

    /// The search was cancelled by the caller.
    #[error("Recovery search cancelled")]
    Cancelled,

    /// Unknown primitive gate name.
    #[error("Unknown primitive gate '{0}'")]
    UnknownPrimitive(String),

    /// Unknown two-qubit generator name.
    #[error("Unknown generator '{0}', expected 'cz' or 'iswap'")]
    UnknownGenerator(String),

    /// Table file written by an incompatible version.
    #[error("Recovery table version {found} is not supported (expected {expected})")]
    TableVersion {
        /// Version in the file.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },

    /// Table built for another entangling gate.
    #[error("Recovery table was built for {table}, sequence uses {requested}")]
    GeneratorMismatch {
        /// Generator of the table.
        table: String,
        /// Generator of the sequence.
        requested: String,
    },

    /// A stabilizer fingerprint is missing from the table.
    #[error("Stabilizer {0} not found in recovery table")]
    MissingEntry(String),

    /// Invalid randomized benchmarking parameter.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// I/O error while reading or writing a table.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Table (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sequence construction failed.
    #[error("Sequence error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for Clifford operations.
pub type CliffordResult<T> = Result<T, CliffordError>;
