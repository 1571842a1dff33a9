//! Built-in experiment generators.

use serde::{Deserialize, Serialize};

use crate::catalog::{from_name, reversed_name};
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::generator::{GeneratorContext, SequenceGenerator};
use crate::sequence::Sequence;
use crate::step::{Alignment, Placement};

/// A π pulse on every qubit, right-aligned so that pulses of different
/// lengths end together before readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rabi;

impl SequenceGenerator for Rabi {
    type Error = IrError;

    fn name(&self) -> &str {
        "rabi"
    }

    fn generate(&self, seq: &mut Sequence, _ctx: &GeneratorContext) -> IrResult<()> {
        seq.add_gate_to_all(
            from_name("Xp")?,
            Placement::default().with_align(Alignment::Right),
        )?;
        Ok(())
    }
}

/// Carr-Purcell-Meiboom-Gill echo train.
///
/// A negative `n_pulse` gives a T1 measurement: one π pulse followed by the
/// wait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cpmg {
    /// Number of refocusing pulses.
    pub n_pulse: i32,
    /// Total free-evolution time in seconds.
    pub duration: f64,
    /// Refocus around Y instead of X.
    pub pi_to_q: bool,
    /// Measure `duration` between pulse edges instead of centers.
    pub edge_to_edge: bool,
}

impl Default for Cpmg {
    fn default() -> Self {
        Self {
            n_pulse: 1,
            duration: 1e-6,
            pi_to_q: true,
            edge_to_edge: false,
        }
    }
}

impl SequenceGenerator for Cpmg {
    type Error = IrError;

    fn name(&self) -> &str {
        "cpmg"
    }

    fn generate(&self, seq: &mut Sequence, ctx: &GeneratorContext) -> IrResult<()> {
        let width_e2e = ctx.xy_pulse(0)?.total_duration();
        let pi = from_name(if self.pi_to_q { "Yp" } else { "Xp" })?;
        let (duration, t1) = if self.edge_to_edge {
            let d = self.duration + width_e2e;
            (d, d)
        } else {
            (self.duration, self.duration + width_e2e / 2.0)
        };

        seq.add_gate_to_all(Gate::spacer(0.0), Placement::at(0.0))?;
        if self.n_pulse < 0 {
            seq.add_gate_to_all(pi, Placement::default())?;
            seq.add_gate_to_all(Gate::spacer(0.0), Placement::at(t1))?;
            return Ok(());
        }

        let half = from_name("X2p")?;
        seq.add_gate_to_all(half.clone(), Placement::default())?;
        let n = self.n_pulse as usize;
        for i in 0..n {
            let t = duration / (n + 1) as f64 * (i + 1) as f64;
            seq.add_gate_to_all(Gate::spacer(0.0), Placement::at(t))?;
            seq.add_gate_to_all(pi.clone(), Placement::default())?;
        }
        seq.add_gate_to_all(Gate::spacer(0.0), Placement::at(duration))?;
        seq.add_gate_to_all(half, Placement::default())?;
        Ok(())
    }
}

/// Repeated application of one named gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseTrain {
    /// Number of pulses.
    pub n_pulse: usize,
    /// Catalog name of the repeated gate.
    pub gate: String,
    /// Play every other pulse with the opposite rotation sign.
    pub alternate: bool,
}

impl Default for PulseTrain {
    fn default() -> Self {
        Self {
            n_pulse: 1,
            gate: "Xp".to_string(),
            alternate: false,
        }
    }
}

impl SequenceGenerator for PulseTrain {
    type Error = IrError;

    fn name(&self) -> &str {
        "pulse_train"
    }

    fn generate(&self, seq: &mut Sequence, _ctx: &GeneratorContext) -> IrResult<()> {
        if self.n_pulse == 0 {
            seq.add_gate_to_all(Gate::identity(), Placement::default())?;
            return Ok(());
        }
        let forward = from_name(&self.gate)?;
        let backward = from_name(&reversed_name(&self.gate))?;
        for i in 0..self.n_pulse {
            let gate = if self.alternate && i % 2 == 1 {
                backward.clone()
            } else {
                forward.clone()
            };
            seq.add_gate_to_all(gate, Placement::default())?;
        }
        Ok(())
    }
}

/// Spin-locking pulse layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinLockingMode {
    /// Y2p, lock, Y2p.
    #[default]
    #[serde(rename = "SL-3")]
    Sl3,
    /// Y2m, Xp, lock, Xp, Y2m.
    #[serde(rename = "SL-5a")]
    Sl5a,
    /// Y2p, Xp, lock, Xp, Y2p.
    #[serde(rename = "SL-5b")]
    Sl5b,
}

impl SpinLockingMode {
    fn frame(self) -> (&'static [&'static str], &'static [&'static str]) {
        match self {
            SpinLockingMode::Sl3 => (&["Y2p"], &["Y2p"]),
            SpinLockingMode::Sl5a => (&["Y2m", "Xp"], &["Xp", "Y2m"]),
            SpinLockingMode::Sl5b => (&["Y2p", "Xp"], &["Xp", "Y2p"]),
        }
    }
}

/// Spin locking: a long constant drive sandwiched between rotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinLocking {
    /// Pulse layout.
    pub mode: SpinLockingMode,
    /// Locking amplitude per qubit.
    pub amplitudes: Vec<f64>,
    /// Locking duration in seconds.
    pub duration: f64,
    /// Locking drive phase in degrees.
    pub phase_deg: f64,
}

impl Default for SpinLocking {
    fn default() -> Self {
        Self {
            mode: SpinLockingMode::default(),
            amplitudes: vec![0.1],
            duration: 1e-6,
            phase_deg: 0.0,
        }
    }
}

impl SequenceGenerator for SpinLocking {
    type Error = IrError;

    fn name(&self) -> &str {
        "spin_locking"
    }

    fn generate(&self, seq: &mut Sequence, ctx: &GeneratorContext) -> IrResult<()> {
        if self.amplitudes.len() != ctx.n_qubit {
            return Err(IrError::GateCountMismatch {
                qubits: ctx.n_qubit,
                gates: self.amplitudes.len(),
            });
        }
        let (before, after) = self.mode.frame();
        for name in before {
            seq.add_gate_to_all(from_name(name)?, Placement::default())?;
        }
        let phase = self.phase_deg.to_radians();
        let lock = self
            .amplitudes
            .iter()
            .map(|&a| Gate::rabi(a, self.duration, phase))
            .collect();
        seq.add_gate(&ctx.all_qubits(), lock)?;
        for name in after {
            seq.add_gate_to_all(from_name(name)?, Placement::default())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpulse_pulse::Pulse;

    fn ctx(n: usize) -> GeneratorContext {
        GeneratorContext::new(vec![Pulse::default(); n])
    }

    fn names(seq: &Sequence, qubit: usize) -> Vec<String> {
        seq.steps()
            .iter()
            .map(|s| s.gate(qubit).map_or("-".to_string(), Gate::label))
            .collect()
    }

    #[test]
    fn test_rabi_is_right_aligned() {
        let mut seq = Sequence::new(2).unwrap();
        Rabi.generate(&mut seq, &ctx(2)).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.steps()[0].placement().align, Alignment::Right);
    }

    #[test]
    fn test_cpmg_echo_positions() {
        let cpmg = Cpmg {
            n_pulse: 2,
            duration: 300e-9,
            pi_to_q: true,
            edge_to_edge: false,
        };
        let mut seq = Sequence::new(1).unwrap();
        cpmg.generate(&mut seq, &ctx(1)).unwrap();
        assert_eq!(
            names(&seq, 0),
            ["I(0.000e0)", "X2p", "I(0.000e0)", "Yp", "I(0.000e0)", "Yp", "I(0.000e0)", "X2p"]
        );
        let anchors: Vec<f64> = seq.steps().iter().filter_map(|s| s.placement().t0).collect();
        assert_eq!(anchors.len(), 4);
        assert!((anchors[1] - 100e-9).abs() < 1e-18);
        assert!((anchors[2] - 200e-9).abs() < 1e-18);
        assert!((anchors[3] - 300e-9).abs() < 1e-18);
    }

    #[test]
    fn test_cpmg_t1_mode() {
        let cpmg = Cpmg {
            n_pulse: -1,
            duration: 1e-6,
            pi_to_q: false,
            edge_to_edge: true,
        };
        let mut seq = Sequence::new(1).unwrap();
        cpmg.generate(&mut seq, &ctx(1)).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.steps()[1].gate(0), Some(&from_name("Xp").unwrap()));
        let width = Pulse::default().total_duration();
        let t1 = seq.steps()[2].placement().t0.unwrap();
        assert!((t1 - (1e-6 + width)).abs() < 1e-18);
    }

    #[test]
    fn test_pulse_train_alternates() {
        let train = PulseTrain {
            n_pulse: 3,
            gate: "X2p".to_string(),
            alternate: true,
        };
        let mut seq = Sequence::new(1).unwrap();
        train.generate(&mut seq, &ctx(1)).unwrap();
        assert_eq!(names(&seq, 0), ["X2p", "X2m", "X2p"]);

        let mut empty = Sequence::new(1).unwrap();
        PulseTrain {
            n_pulse: 0,
            ..PulseTrain::default()
        }
        .generate(&mut empty, &ctx(1))
        .unwrap();
        assert_eq!(names(&empty, 0), ["I"]);
    }

    #[test]
    fn test_spin_locking_layout() {
        let sl = SpinLocking {
            mode: SpinLockingMode::Sl5a,
            amplitudes: vec![0.1, 0.2],
            duration: 500e-9,
            phase_deg: 90.0,
        };
        let mut seq = Sequence::new(2).unwrap();
        sl.generate(&mut seq, &ctx(2)).unwrap();
        assert_eq!(seq.len(), 5);
        assert_eq!(names(&seq, 0)[0], "Y2m");
        match seq.steps()[2].gate(1) {
            Some(Gate::Rabi {
                amplitude,
                plateau,
                phase,
                ..
            }) => {
                assert_eq!(*amplitude, 0.2);
                assert_eq!(*plateau, 500e-9);
                assert!((phase - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(SpinLocking::default().generate(&mut seq, &ctx(2)).is_err());
    }
}
