//! Error types for the pulse crate.

use thiserror::Error;

/// Errors that can occur while building or evaluating a pulse.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PulseError {
    /// The pulse shape name is not one of the supported shapes.
    #[error("Unknown pulse shape '{0}'")]
    UnknownShape(String),

    /// The pulse kind name is not one of XY, Z or Readout.
    #[error("Unknown pulse kind '{0}'")]
    UnknownKind(String),

    /// Adiabatic flux pulse with a coupling that makes the mixing angles degenerate.
    #[error("Degenerate mixing angle: coupling {coupling} Hz with offset {offset} Hz and target {target} Hz")]
    DegenerateCoupling {
        /// Qubit-qubit coupling strength.
        coupling: f64,
        /// Initial detuning.
        offset: f64,
        /// Final detuning.
        target: f64,
    },

    /// Requested frequency lies outside the qubit spectrum.
    #[error("Frequency {frequency} Hz is outside the qubit spectrum [{f_min}, {f_max}]")]
    OutsideSpectrum {
        /// Requested frequency.
        frequency: f64,
        /// Lowest reachable frequency.
        f_min: f64,
        /// Highest reachable frequency.
        f_max: f64,
    },

    /// A numeric parameter is out of its valid domain.
    #[error("Invalid pulse parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type for pulse operations.
pub type PulseResult<T> = Result<T, PulseError>;
