//! Pulse shape and pulse kind tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PulseError;

/// Envelope shape of a pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PulseShape {
    /// Gaussian with optional flat top.
    #[default]
    Gaussian,
    /// Top-hat of `width + plateau`.
    Square,
    /// Linear rise and fall of length `width` around a plateau.
    Ramp,
    /// Raised-cosine rise and fall around a plateau.
    Cosine,
    /// Slepian-style adiabatic flux pulse for controlled-phase gates.
    AdiabaticFlux,
    /// Two opposite-sign adiabatic flux pulses back to back.
    NetZero,
}

impl PulseShape {
    /// Canonical name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            PulseShape::Gaussian => "Gaussian",
            PulseShape::Square => "Square",
            PulseShape::Ramp => "Ramp",
            PulseShape::Cosine => "Cosine",
            PulseShape::AdiabaticFlux => "CZ",
            PulseShape::NetZero => "NetZero",
        }
    }

    /// Whether this shape is an adiabatic flux trajectory.
    pub fn is_adiabatic(self) -> bool {
        matches!(self, PulseShape::AdiabaticFlux | PulseShape::NetZero)
    }
}

impl fmt::Display for PulseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PulseShape {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaussian" => Ok(PulseShape::Gaussian),
            "square" => Ok(PulseShape::Square),
            "ramp" => Ok(PulseShape::Ramp),
            "cosine" => Ok(PulseShape::Cosine),
            "cz" | "adiabaticflux" | "adiabatic_flux" => Ok(PulseShape::AdiabaticFlux),
            "netzero" | "net_zero" => Ok(PulseShape::NetZero),
            _ => Err(PulseError::UnknownShape(s.to_string())),
        }
    }
}

impl TryFrom<String> for PulseShape {
    type Error = PulseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PulseShape> for String {
    fn from(shape: PulseShape) -> Self {
        shape.name().to_string()
    }
}

/// Which output line a pulse is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PulseKind {
    /// Microwave drive, complex I/Q.
    #[default]
    Xy,
    /// Flux line, real valued.
    Z,
    /// Multiplexed readout, complex I/Q.
    Readout,
}

impl PulseKind {
    /// Canonical name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            PulseKind::Xy => "XY",
            PulseKind::Z => "Z",
            PulseKind::Readout => "Readout",
        }
    }

    /// Complex pulses get DRAG and single-sideband mixing.
    pub fn is_complex(self) -> bool {
        !matches!(self, PulseKind::Z)
    }
}

impl fmt::Display for PulseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PulseKind {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xy" => Ok(PulseKind::Xy),
            "z" => Ok(PulseKind::Z),
            "readout" => Ok(PulseKind::Readout),
            _ => Err(PulseError::UnknownKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for PulseKind {
    type Error = PulseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PulseKind> for String {
    fn from(kind: PulseKind) -> Self {
        kind.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_parse() {
        assert_eq!("gaussian".parse::<PulseShape>().unwrap(), PulseShape::Gaussian);
        assert_eq!("CZ".parse::<PulseShape>().unwrap(), PulseShape::AdiabaticFlux);
        assert_eq!("NetZero".parse::<PulseShape>().unwrap(), PulseShape::NetZero);
        assert!(matches!(
            "triangle".parse::<PulseShape>(),
            Err(PulseError::UnknownShape(_))
        ));
    }

    #[test]
    fn test_shape_serde_uses_names() {
        let json = serde_json::to_string(&PulseShape::AdiabaticFlux).unwrap();
        assert_eq!(json, "\"CZ\"");
        let back: PulseShape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PulseShape::AdiabaticFlux);
        assert!(serde_json::from_str::<PulseShape>("\"Sawtooth\"").is_err());
    }

    #[test]
    fn test_kind_is_complex() {
        assert!(PulseKind::Xy.is_complex());
        assert!(PulseKind::Readout.is_complex());
        assert!(!PulseKind::Z.is_complex());
    }
}
