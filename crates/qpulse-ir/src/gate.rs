//! Gate types.
//!
//! A [`Gate`] is an immutable value. It knows which configured pulse it plays
//! ([`Gate::pulse_slot`]), how it adjusts that pulse, how long it lasts and how
//! to render itself. Virtual-Z propagation goes through [`Gate::add_phase`],
//! which returns a new gate.

use num_complex::Complex64;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use qpulse_pulse::{Pulse, PulseResult};

use crate::composite::CompositeGate;

/// Rotation axis of a single-qubit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Drive in phase.
    X,
    /// Drive in quadrature.
    Y,
    /// Flux pulse.
    Z,
}

impl Axis {
    /// Carrier phase offset for a drive around this axis.
    pub fn drive_phase(self) -> f64 {
        match self {
            Axis::X | Axis::Z => 0.0,
            Axis::Y => FRAC_PI_2,
        }
    }
}

/// Native two-qubit interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwoQubitKind {
    /// Controlled phase.
    Cz,
    /// iSWAP.
    ISwap,
}

/// Which configured per-qubit pulse a gate plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PulseSlot {
    /// The qubit's single-qubit drive pulse.
    Xy,
    /// The qubit's single-qubit flux pulse.
    Z,
    /// The flux pulse of the pair (qubit, qubit + 1).
    TwoQubit,
    /// The qubit's readout pulse.
    Readout,
    /// The gate carries its own pulse.
    Embedded,
}

/// A gate acting on one qubit slot of a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Idle. Takes the drive pulse's duration, or a fixed width as a spacer.
    Identity {
        /// Fixed duration in seconds.
        width: Option<f64>,
    },
    /// Rotation by `angle` around `axis`.
    Rotation {
        /// Rotation axis.
        axis: Axis,
        /// Rotation angle in radians.
        angle: f64,
        /// Accumulated virtual-Z phase.
        phase_shift: f64,
    },
    /// Zero-duration frame change.
    VirtualZ {
        /// Frame rotation in radians.
        angle: f64,
    },
    /// Native two-qubit gate, played on the lower qubit of the pair.
    TwoQubit {
        /// Interaction type.
        kind: TwoQubitKind,
        /// Accumulated virtual-Z phase.
        phase_shift: f64,
    },
    /// Readout pulse.
    Readout,
    /// A fully specified pulse.
    Custom {
        /// The pulse to play.
        pulse: Box<Pulse>,
        /// Accumulated virtual-Z phase.
        phase_shift: f64,
    },
    /// Drive pulse with overridden amplitude, plateau and phase.
    Rabi {
        /// Drive amplitude.
        amplitude: f64,
        /// Plateau length in seconds.
        plateau: f64,
        /// Drive phase in radians.
        phase: f64,
        /// Accumulated virtual-Z phase.
        phase_shift: f64,
    },
    /// Rows of gates over a fixed tuple of qubits, expanded when added.
    Composite(CompositeGate),
}

impl Gate {
    /// Identity taking its duration from the drive pulse.
    pub fn identity() -> Self {
        Gate::Identity { width: None }
    }

    /// Identity with a fixed duration.
    pub fn spacer(width: f64) -> Self {
        Gate::Identity { width: Some(width) }
    }

    /// Rotation around an axis.
    pub fn rotation(axis: Axis, angle: f64) -> Self {
        Gate::Rotation {
            axis,
            angle,
            phase_shift: 0.0,
        }
    }

    /// Virtual Z rotation.
    pub fn virtual_z(angle: f64) -> Self {
        Gate::VirtualZ { angle }
    }

    /// Controlled-phase gate.
    pub fn cz() -> Self {
        Gate::TwoQubit {
            kind: TwoQubitKind::Cz,
            phase_shift: 0.0,
        }
    }

    /// iSWAP gate.
    pub fn iswap() -> Self {
        Gate::TwoQubit {
            kind: TwoQubitKind::ISwap,
            phase_shift: 0.0,
        }
    }

    /// Readout.
    pub fn readout() -> Self {
        Gate::Readout
    }

    /// Gate playing an explicit pulse.
    pub fn custom(pulse: Pulse) -> Self {
        Gate::Custom {
            pulse: Box::new(pulse),
            phase_shift: 0.0,
        }
    }

    /// Rabi drive.
    pub fn rabi(amplitude: f64, plateau: f64, phase: f64) -> Self {
        Gate::Rabi {
            amplitude,
            plateau,
            phase,
            phase_shift: 0.0,
        }
    }

    /// Number of qubit slots this gate occupies when added to a sequence.
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::Composite(c) => c.n_qubit(),
            _ => 1,
        }
    }

    /// Whether this is a readout gate.
    pub fn is_readout(&self) -> bool {
        matches!(self, Gate::Readout)
    }

    /// Whether this is an identity (spacer or not).
    pub fn is_identity(&self) -> bool {
        matches!(self, Gate::Identity { .. })
    }

    /// Whether this is a virtual Z gate.
    pub fn is_virtual(&self) -> bool {
        matches!(self, Gate::VirtualZ { .. })
    }

    /// The configured pulse this gate plays; `None` for gates without samples.
    pub fn pulse_slot(&self) -> Option<PulseSlot> {
        match self {
            Gate::Identity { .. } | Gate::Rabi { .. } => Some(PulseSlot::Xy),
            Gate::Rotation { axis: Axis::Z, .. } => Some(PulseSlot::Z),
            Gate::Rotation { .. } => Some(PulseSlot::Xy),
            Gate::TwoQubit { .. } => Some(PulseSlot::TwoQubit),
            Gate::Readout => Some(PulseSlot::Readout),
            Gate::Custom { .. } => Some(PulseSlot::Embedded),
            Gate::VirtualZ { .. } | Gate::Composite(_) => None,
        }
    }

    /// Copy of `base` adjusted for this gate; `None` if the gate plays nothing.
    ///
    /// For [`Gate::Custom`] the embedded pulse is used and `base` is ignored.
    pub fn adjusted_pulse(&self, base: &Pulse) -> Option<Pulse> {
        match self {
            Gate::Identity { width } => {
                let mut pulse = base.clone();
                pulse.amplitude = 0.0;
                pulse.use_drag = false;
                if let Some(w) = width {
                    pulse.width = *w;
                    pulse.plateau = 0.0;
                }
                Some(pulse)
            }
            Gate::Rotation {
                axis: Axis::Z,
                angle,
                ..
            } => {
                let mut pulse = base.clone();
                pulse.amplitude = base.amplitude * angle / PI;
                Some(pulse)
            }
            Gate::Rotation {
                axis,
                angle,
                phase_shift,
            } => {
                let mut pulse = base.clone();
                pulse.amplitude = angle / PI;
                pulse.phase = base.phase + axis.drive_phase() + phase_shift;
                Some(pulse)
            }
            Gate::TwoQubit { phase_shift, .. } => {
                let mut pulse = base.clone();
                pulse.phase = base.phase + phase_shift;
                Some(pulse)
            }
            Gate::Readout => Some(base.clone()),
            Gate::Custom { pulse, phase_shift } => {
                let mut pulse = pulse.as_ref().clone();
                pulse.phase += phase_shift;
                Some(pulse)
            }
            Gate::Rabi {
                amplitude,
                plateau,
                phase,
                phase_shift,
            } => {
                let mut pulse = base.clone();
                pulse.amplitude = *amplitude;
                pulse.plateau = *plateau;
                pulse.phase = phase + phase_shift;
                Some(pulse)
            }
            Gate::VirtualZ { .. } | Gate::Composite(_) => None,
        }
    }

    /// Duration in seconds when played with `base`.
    pub fn duration(&self, base: &Pulse) -> f64 {
        match self {
            Gate::Identity { width: Some(w) } => w.max(0.0),
            Gate::VirtualZ { .. } | Gate::Composite(_) => 0.0,
            _ => self
                .adjusted_pulse(base)
                .map_or(0.0, |p| p.total_duration()),
        }
    }

    /// Samples of this gate centered at `t0`, one per entry of `t`.
    pub fn render(&self, base: &Pulse, t0: f64, t: &[f64]) -> PulseResult<Vec<Complex64>> {
        match self.adjusted_pulse(base) {
            Some(pulse) => pulse.waveform(t0, t),
            None => Ok(vec![Complex64::new(0.0, 0.0); t.len()]),
        }
    }

    /// New gate with `angle` added to its drive phase.
    #[must_use]
    pub fn add_phase(&self, angle: f64) -> Gate {
        match self {
            Gate::Rotation {
                axis,
                angle: theta,
                phase_shift,
            } => Gate::Rotation {
                axis: *axis,
                angle: *theta,
                phase_shift: phase_shift + angle,
            },
            Gate::TwoQubit { kind, phase_shift } => Gate::TwoQubit {
                kind: *kind,
                phase_shift: phase_shift + angle,
            },
            Gate::Custom { pulse, phase_shift } => Gate::Custom {
                pulse: pulse.clone(),
                phase_shift: phase_shift + angle,
            },
            Gate::Rabi {
                amplitude,
                plateau,
                phase,
                phase_shift,
            } => Gate::Rabi {
                amplitude: *amplitude,
                plateau: *plateau,
                phase: *phase,
                phase_shift: phase_shift + angle,
            },
            Gate::Composite(c) => Gate::Composite(c.add_phase(angle)),
            Gate::Identity { .. } | Gate::VirtualZ { .. } | Gate::Readout => self.clone(),
        }
    }

    /// Short human-readable label.
    pub fn label(&self) -> String {
        if let Some(name) = crate::catalog::name_of(self) {
            return name.to_string();
        }
        match self {
            Gate::Identity { width: None } => "I".to_string(),
            Gate::Identity { width: Some(w) } => format!("I({w:.3e})"),
            Gate::Rotation { axis, angle, .. } => format!("R{axis:?}({angle:.4})"),
            Gate::VirtualZ { angle } => format!("VZ({angle:.4})"),
            Gate::TwoQubit {
                kind: TwoQubitKind::Cz,
                ..
            } => "CPh".to_string(),
            Gate::TwoQubit {
                kind: TwoQubitKind::ISwap,
                ..
            } => "iSWAP".to_string(),
            Gate::Readout => "Readout".to_string(),
            Gate::Custom { pulse, .. } => format!("Custom({})", pulse.shape),
            Gate::Rabi { amplitude, .. } => format!("Rabi({amplitude:.4})"),
            Gate::Composite(c) => format!("Composite[{}x{}]", c.len(), c.n_qubit()),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpulse_pulse::{PulseKind, PulseShape};

    fn drive() -> Pulse {
        Pulse::default()
    }

    #[test]
    fn test_rotation_amplitude_is_angle_over_pi() {
        let g = Gate::rotation(Axis::X, PI / 2.0);
        let p = g.adjusted_pulse(&drive()).unwrap();
        assert!((p.amplitude - 0.5).abs() < 1e-15);
        assert_eq!(p.phase, 0.0);

        let y = Gate::rotation(Axis::Y, -PI).adjusted_pulse(&drive()).unwrap();
        assert!((y.amplitude + 1.0).abs() < 1e-15);
        assert!((y.phase - FRAC_PI_2).abs() < 1e-15);
    }

    #[test]
    fn test_z_rotation_scales_flux_pulse() {
        let flux = Pulse::new(PulseShape::Square)
            .with_kind(PulseKind::Z)
            .with_amplitude(0.2);
        let p = Gate::rotation(Axis::Z, PI / 2.0).adjusted_pulse(&flux).unwrap();
        assert!((p.amplitude - 0.1).abs() < 1e-15);
        assert_eq!(Gate::rotation(Axis::Z, PI).pulse_slot(), Some(PulseSlot::Z));
    }

    #[test]
    fn test_identity_is_silent() {
        let base = drive().with_drag(1e-9);
        let p = Gate::identity().adjusted_pulse(&base).unwrap();
        assert_eq!(p.amplitude, 0.0);
        assert!(!p.use_drag);
        assert_eq!(Gate::identity().duration(&base), base.total_duration());
        assert_eq!(Gate::spacer(42e-9).duration(&base), 42e-9);
    }

    #[test]
    fn test_virtual_z_has_no_samples() {
        let g = Gate::virtual_z(PI);
        assert_eq!(g.duration(&drive()), 0.0);
        assert!(g.adjusted_pulse(&drive()).is_none());
        let y = g.render(&drive(), 0.0, &[0.0, 1e-9]).unwrap();
        assert!(y.iter().all(|c| c.norm() == 0.0));
    }

    #[test]
    fn test_add_phase_returns_new_gate() {
        let g = Gate::rotation(Axis::X, PI);
        let shifted = g.add_phase(0.3).add_phase(0.2);
        assert_eq!(g, Gate::rotation(Axis::X, PI));
        match shifted {
            Gate::Rotation { phase_shift, .. } => assert!((phase_shift - 0.5).abs() < 1e-15),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(Gate::Readout.add_phase(1.0), Gate::Readout);
    }

    #[test]
    fn test_phase_shift_equals_explicit_phase() {
        let t: Vec<f64> = (0..60).map(|i| i as f64 / 1.2e9).collect();
        let via_shift = Gate::rotation(Axis::X, PI)
            .add_phase(PI)
            .render(&drive(), 25e-9, &t)
            .unwrap();
        let explicit = Gate::rotation(Axis::X, PI)
            .render(&drive().with_phase(PI), 25e-9, &t)
            .unwrap();
        assert_eq!(via_shift, explicit);
    }

    #[test]
    fn test_custom_uses_embedded_pulse() {
        let embedded = Pulse::new(PulseShape::Square).with_width(7e-9);
        let g = Gate::custom(embedded.clone());
        assert_eq!(g.pulse_slot(), Some(PulseSlot::Embedded));
        assert_eq!(g.duration(&drive()), embedded.total_duration());
    }

    #[test]
    fn test_rabi_overrides() {
        let p = Gate::rabi(0.3, 50e-9, 1.0).adjusted_pulse(&drive()).unwrap();
        assert_eq!(p.amplitude, 0.3);
        assert_eq!(p.plateau, 50e-9);
        assert_eq!(p.phase, 1.0);
    }
}
