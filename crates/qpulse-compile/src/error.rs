//! Error types for the compiler.

use qpulse_ir::IrError;
use qpulse_pulse::PulseError;
use thiserror::Error;

/// Errors raised while scheduling and rendering.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The compiler configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// No pulse is configured for a gate that needs one.
    #[error("No {slot} pulse configured for qubit {qubit}")]
    MissingPulse {
        /// Pulse set name.
        slot: &'static str,
        /// Qubit index.
        qubit: usize,
    },

    /// Nothing to compile.
    #[error("Sequence has no steps")]
    EmptySequence,

    /// A composite gate reached the scheduler.
    #[error("Step {step} still holds a composite gate")]
    UnexpandedComposite {
        /// Step index.
        step: usize,
    },

    /// The crosstalk matrix cannot be inverted.
    #[error("Crosstalk matrix is singular")]
    SingularCrosstalk,

    /// Pulse rendering failed.
    #[error("Pulse error: {0}")]
    Pulse(#[from] PulseError),

    /// Sequence construction failed.
    #[error("Sequence error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;
