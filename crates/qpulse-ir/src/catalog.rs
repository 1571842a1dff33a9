//! Named gates.
//!
//! Symbolic names used in configuration files and persisted recovery tables.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{IrError, IrResult};
use crate::gate::{Axis, Gate, TwoQubitKind};

/// Every name accepted by [`from_name`].
pub const GATE_NAMES: &[&str] = &[
    "I", "Xp", "Xm", "X2p", "X2m", "Yp", "Ym", "Y2p", "Y2m", "Zp", "Zm", "Z2p", "Z2m", "VZp",
    "VZm", "VZ2p", "VZ2m", "CPh", "iSWAP", "Readout",
];

fn rotation_table() -> [(&'static str, Axis, f64); 12] {
    [
        ("Xp", Axis::X, PI),
        ("Xm", Axis::X, -PI),
        ("X2p", Axis::X, FRAC_PI_2),
        ("X2m", Axis::X, -FRAC_PI_2),
        ("Yp", Axis::Y, PI),
        ("Ym", Axis::Y, -PI),
        ("Y2p", Axis::Y, FRAC_PI_2),
        ("Y2m", Axis::Y, -FRAC_PI_2),
        ("Zp", Axis::Z, PI),
        ("Zm", Axis::Z, -PI),
        ("Z2p", Axis::Z, FRAC_PI_2),
        ("Z2m", Axis::Z, -FRAC_PI_2),
    ]
}

fn virtual_table() -> [(&'static str, f64); 4] {
    [
        ("VZp", PI),
        ("VZm", -PI),
        ("VZ2p", FRAC_PI_2),
        ("VZ2m", -FRAC_PI_2),
    ]
}

/// Look up a gate by symbolic name.
pub fn from_name(name: &str) -> IrResult<Gate> {
    match name {
        "I" => return Ok(Gate::identity()),
        "CPh" | "CZ" => return Ok(Gate::cz()),
        "iSWAP" => return Ok(Gate::iswap()),
        "Readout" => return Ok(Gate::readout()),
        _ => {}
    }
    if let Some((_, axis, angle)) = rotation_table().into_iter().find(|(n, ..)| *n == name) {
        return Ok(Gate::rotation(axis, angle));
    }
    if let Some((_, angle)) = virtual_table().into_iter().find(|(n, _)| *n == name) {
        return Ok(Gate::virtual_z(angle));
    }
    Err(IrError::UnknownGate(name.to_string()))
}

/// Symbolic name of a gate, if it is one of the named gates.
pub fn name_of(gate: &Gate) -> Option<&'static str> {
    match gate {
        Gate::Identity { width: None } => Some("I"),
        Gate::Readout => Some("Readout"),
        Gate::TwoQubit {
            kind: TwoQubitKind::Cz,
            phase_shift,
        } if *phase_shift == 0.0 => Some("CPh"),
        Gate::TwoQubit {
            kind: TwoQubitKind::ISwap,
            phase_shift,
        } if *phase_shift == 0.0 => Some("iSWAP"),
        Gate::Rotation {
            axis,
            angle,
            phase_shift,
        } if *phase_shift == 0.0 => rotation_table()
            .into_iter()
            .find(|(_, a, th)| a == axis && th == angle)
            .map(|(n, ..)| n),
        Gate::VirtualZ { angle } => virtual_table()
            .into_iter()
            .find(|(_, th)| th == angle)
            .map(|(n, _)| n),
        _ => None,
    }
}

/// Name of the same rotation in the opposite direction (`X2p` → `X2m`).
pub fn reversed_name(name: &str) -> String {
    if let Some(stem) = name.strip_suffix('p') {
        format!("{stem}m")
    } else if let Some(stem) = name.strip_suffix('m') {
        format!("{stem}p")
    } else {
        name.to_string()
    }
}
