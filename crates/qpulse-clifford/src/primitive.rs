//! Native gates the Clifford decompositions are written in.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use qpulse_ir::{Axis, Gate};

use crate::error::CliffordError;
use crate::unitary::{Unitary2x2, Unitary4x4};

/// A native gate, serialized by its catalog name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    /// Idle
    I,
    /// X(π)
    Xp,
    /// X(-π)
    Xm,
    /// X(π/2)
    X2p,
    /// X(-π/2)
    X2m,
    /// Y(π)
    Yp,
    /// Y(-π)
    Ym,
    /// Y(π/2)
    Y2p,
    /// Y(-π/2)
    Y2m,
    /// Controlled phase
    #[serde(rename = "CPh", alias = "CZ")]
    Cz,
    /// iSWAP
    #[serde(rename = "iSWAP")]
    ISwap,
}

impl Primitive {
    /// All primitives.
    pub const ALL: [Primitive; 11] = [
        Primitive::I,
        Primitive::Xp,
        Primitive::Xm,
        Primitive::X2p,
        Primitive::X2m,
        Primitive::Yp,
        Primitive::Ym,
        Primitive::Y2p,
        Primitive::Y2m,
        Primitive::Cz,
        Primitive::ISwap,
    ];

    /// Catalog name.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::I => "I",
            Primitive::Xp => "Xp",
            Primitive::Xm => "Xm",
            Primitive::X2p => "X2p",
            Primitive::X2m => "X2m",
            Primitive::Yp => "Yp",
            Primitive::Ym => "Ym",
            Primitive::Y2p => "Y2p",
            Primitive::Y2m => "Y2m",
            Primitive::Cz => "CPh",
            Primitive::ISwap => "iSWAP",
        }
    }

    /// Whether this is an entangling gate.
    pub fn is_two_qubit(self) -> bool {
        matches!(self, Primitive::Cz | Primitive::ISwap)
    }

    /// Whether this is the idle gate.
    pub fn is_identity(self) -> bool {
        self == Primitive::I
    }

    fn rotation(self) -> Option<(Axis, f64)> {
        match self {
            Primitive::Xp => Some((Axis::X, PI)),
            Primitive::Xm => Some((Axis::X, -PI)),
            Primitive::X2p => Some((Axis::X, FRAC_PI_2)),
            Primitive::X2m => Some((Axis::X, -FRAC_PI_2)),
            Primitive::Yp => Some((Axis::Y, PI)),
            Primitive::Ym => Some((Axis::Y, -PI)),
            Primitive::Y2p => Some((Axis::Y, FRAC_PI_2)),
            Primitive::Y2m => Some((Axis::Y, -FRAC_PI_2)),
            Primitive::I | Primitive::Cz | Primitive::ISwap => None,
        }
    }

    /// Single-qubit matrix; entanglers map to the identity.
    pub fn unitary(self) -> Unitary2x2 {
        match self.rotation() {
            Some((Axis::X, angle)) => Unitary2x2::rx(angle),
            Some((_, angle)) => Unitary2x2::ry(angle),
            None => Unitary2x2::identity(),
        }
    }

    /// Two-qubit matrix of an entangler.
    pub fn entangler(self) -> Option<Unitary4x4> {
        match self {
            Primitive::Cz => Some(Unitary4x4::cz()),
            Primitive::ISwap => Some(Unitary4x4::iswap()),
            _ => None,
        }
    }

    /// The sequence gate playing this primitive.
    pub fn to_gate(self) -> Gate {
        match self {
            Primitive::I => Gate::identity(),
            Primitive::Cz => Gate::cz(),
            Primitive::ISwap => Gate::iswap(),
            p => match p.rotation() {
                Some((axis, angle)) => Gate::rotation(axis, angle),
                None => Gate::identity(),
            },
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = CliffordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "CZ" {
            return Ok(Primitive::Cz);
        }
        Primitive::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| CliffordError::UnknownPrimitive(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpulse_ir::from_name;

    #[test]
    fn test_names_match_catalog() {
        for p in Primitive::ALL {
            assert_eq!(from_name(p.name()).unwrap(), p.to_gate());
            assert_eq!(p.name().parse::<Primitive>().unwrap(), p);
        }
        assert!("Zp".parse::<Primitive>().is_err());
    }

    #[test]
    fn test_serde_uses_catalog_names() {
        let json = serde_json::to_string(&[Primitive::Y2m, Primitive::Cz]).unwrap();
        assert_eq!(json, r#"["Y2m","CPh"]"#);
        let back: Vec<Primitive> = serde_json::from_str(r#"["CZ","iSWAP"]"#).unwrap();
        assert_eq!(back, vec![Primitive::Cz, Primitive::ISwap]);
    }

    #[test]
    fn test_opposite_rotations_agree_up_to_phase() {
        assert!((Primitive::Xp.unitary() * Primitive::Xm.unitary().dagger()).is_identity());
        assert!((Primitive::Y2p.unitary() * Primitive::Y2m.unitary()).is_identity());
    }
}
