//! Compiler configuration.
//!
//! One immutable [`CompilerConfig`] holds everything the compiler reads:
//! timing, waveform sizing, per-qubit pulses and post-processing options.
//! It is usually deserialized from the `compiler` section of a run file.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use qpulse_ir::{PulseSlot, MAX_QUBIT};
use qpulse_pulse::{Pulse, PulseKind, PulseShape};

use crate::error::{CompileError, CompileResult};

/// Fixed readout phases (in turns) used when readout phases are distributed,
/// so that multiplexed tones do not add up coherently.
pub const READOUT_PHASES: [f64; MAX_QUBIT] = [
    0.8847060, 0.2043214, 0.9426104, 0.6947334, 0.8752361, 0.2246747, 0.6503154, 0.7305004,
    0.1309068,
];

/// Complete compiler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Number of qubits
    #[serde(default = "default_n_qubit")]
    pub n_qubit: usize,

    /// Sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// Waveform length when not trimming to the sequence
    #[serde(default = "default_n_points")]
    pub n_points: usize,

    /// Start of the first step, in seconds
    #[serde(default = "default_first_delay")]
    pub first_delay: f64,

    /// Default spacing between steps, in seconds
    #[serde(default = "default_pulse_spacing")]
    pub pulse_spacing: f64,

    /// Size waveforms to fit the sequence instead of `n_points`
    #[serde(default = "default_true")]
    pub trim_to_sequence: bool,

    /// Shift the sequence so that it ends at the end of the waveform
    #[serde(default)]
    pub align_to_end: bool,

    /// Each qubit has its own drive line
    #[serde(default = "default_true")]
    pub local_xy: bool,

    /// Play gates of one step at the same time
    #[serde(default = "default_true")]
    pub simultaneous_pulses: bool,

    /// Per-qubit drive line delays, in seconds
    #[serde(default)]
    pub xy_delays: Vec<f64>,

    /// Per-qubit flux line delays, in seconds
    #[serde(default)]
    pub z_delays: Vec<f64>,

    /// Single-qubit drive pulse per qubit
    #[serde(default)]
    pub xy: Vec<Pulse>,

    /// Single-qubit flux pulse per qubit
    #[serde(default)]
    pub z: Vec<Pulse>,

    /// Two-qubit pulse per adjacent pair, indexed by the lower qubit
    #[serde(default)]
    pub two_qubit: Vec<Pulse>,

    /// Readout pulse per qubit
    #[serde(default)]
    pub readout_pulses: Vec<Pulse>,

    /// Readout waveform settings
    #[serde(default)]
    pub readout: ReadoutConfig,

    /// Microwave gate switch waveform
    #[serde(default)]
    pub gate_switch: Option<GateSwitchConfig>,

    /// Flux crosstalk matrix, row `i` giving the flux seen by qubit `i`
    #[serde(default)]
    pub crosstalk: Option<Vec<Vec<f64>>>,
}

/// Readout waveform settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadoutConfig {
    /// Readout waveform has the same length as the main waveforms
    #[serde(default)]
    pub match_main_size: bool,

    /// Constant added to the readout I waveform
    #[serde(default)]
    pub i_offset: f64,

    /// Constant added to the readout Q waveform
    #[serde(default)]
    pub q_offset: f64,

    /// Use the fixed phase table for the readout tones
    #[serde(default)]
    pub distribute_phases: bool,

    /// Readout trigger waveform
    #[serde(default)]
    pub trigger: Option<ReadoutTrigger>,
}

/// Readout trigger pulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadoutTrigger {
    /// Trigger level
    #[serde(default = "default_trigger_amplitude")]
    pub amplitude: f64,

    /// Trigger length, in seconds
    #[serde(default = "default_trigger_duration")]
    pub duration: f64,
}

/// Microwave gate switch settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateSwitchConfig {
    /// Keep the switch open for the whole sequence
    #[serde(default)]
    pub uniform: bool,

    /// Shift of the gate waveform, in seconds
    #[serde(default)]
    pub delay: f64,

    /// Extra open time before and after each pulse, in seconds
    #[serde(default = "default_gate_overlap")]
    pub overlap: f64,

    /// Gaps shorter than this are closed, in seconds
    #[serde(default = "default_minimal_gate_time")]
    pub minimal_gate_time: f64,
}

impl Default for GateSwitchConfig {
    fn default() -> Self {
        Self {
            uniform: false,
            delay: 0.0,
            overlap: default_gate_overlap(),
            minimal_gate_time: default_minimal_gate_time(),
        }
    }
}

// Default value functions
fn default_n_qubit() -> usize {
    1
}

fn default_sample_rate() -> f64 {
    1.2e9
}

fn default_n_points() -> usize {
    240_000
}

fn default_first_delay() -> f64 {
    100e-9
}

fn default_pulse_spacing() -> f64 {
    10e-9
}

fn default_true() -> bool {
    true
}

fn default_trigger_amplitude() -> f64 {
    1.0
}

fn default_trigger_duration() -> f64 {
    1e-6
}

fn default_gate_overlap() -> f64 {
    20e-9
}

fn default_minimal_gate_time() -> f64 {
    20e-9
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new(default_n_qubit())
    }
}

impl CompilerConfig {
    /// Configuration for `n_qubit` qubits with default pulses on every line.
    pub fn new(n_qubit: usize) -> Self {
        let xy = Pulse::default();
        let z = Pulse::default().with_kind(PulseKind::Z);
        let two_qubit = Pulse::new(PulseShape::AdiabaticFlux)
            .with_kind(PulseKind::Z)
            .with_width(50e-9);
        let readout = Pulse::new(PulseShape::Square)
            .with_kind(PulseKind::Readout)
            .with_amplitude(0.1)
            .with_width(0.0)
            .with_plateau(1e-6);
        Self {
            n_qubit,
            sample_rate: default_sample_rate(),
            n_points: default_n_points(),
            first_delay: default_first_delay(),
            pulse_spacing: default_pulse_spacing(),
            trim_to_sequence: true,
            align_to_end: false,
            local_xy: true,
            simultaneous_pulses: true,
            xy_delays: vec![0.0; n_qubit],
            z_delays: vec![0.0; n_qubit],
            xy: vec![xy; n_qubit],
            z: vec![z; n_qubit],
            two_qubit: vec![two_qubit; n_qubit.saturating_sub(1)],
            readout_pulses: vec![readout; n_qubit],
            readout: ReadoutConfig::default(),
            gate_switch: None,
            crosstalk: None,
        }
    }

    /// Replace every drive pulse.
    #[must_use]
    pub fn with_xy_pulse(mut self, pulse: Pulse) -> Self {
        self.xy = vec![pulse; self.n_qubit];
        self
    }

    /// Set the sample rate.
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Pad every per-qubit pulse list up to `n_qubit` with the default
    /// pulses of [`CompilerConfig::new`].
    #[must_use]
    pub fn with_default_pulses(mut self) -> Self {
        let defaults = Self::new(self.n_qubit);
        for (pulses, fill) in [
            (&mut self.xy, defaults.xy),
            (&mut self.z, defaults.z),
            (&mut self.two_qubit, defaults.two_qubit),
            (&mut self.readout_pulses, defaults.readout_pulses),
        ] {
            if pulses.len() < fill.len() {
                let start = pulses.len();
                pulses.extend(fill.into_iter().skip(start));
            }
        }
        self
    }

    /// Check the configuration before any rendering.
    pub fn validate(&self) -> CompileResult<()> {
        if self.n_qubit == 0 || self.n_qubit > MAX_QUBIT {
            return Err(CompileError::Configuration(format!(
                "qubit count must be between 1 and {MAX_QUBIT}, got {}",
                self.n_qubit
            )));
        }
        if !(self.sample_rate > 0.0) || !self.sample_rate.is_finite() {
            return Err(CompileError::Configuration(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if !self.trim_to_sequence && self.n_points < 2 {
            return Err(CompileError::Configuration(
                "waveforms need at least two points".into(),
            ));
        }
        for (slot, pulses) in [
            ("xy", &self.xy),
            ("z", &self.z),
            ("readout", &self.readout_pulses),
        ] {
            if pulses.len() < self.n_qubit {
                return Err(CompileError::MissingPulse {
                    slot,
                    qubit: pulses.len(),
                });
            }
        }
        if let Some(matrix) = &self.crosstalk {
            if matrix.len() != self.n_qubit || matrix.iter().any(|row| row.len() != self.n_qubit) {
                return Err(CompileError::Configuration(format!(
                    "crosstalk matrix must be {0}x{0}",
                    self.n_qubit
                )));
            }
        }
        Ok(())
    }

    /// Drive line delay of `qubit`; missing entries are zero.
    pub fn xy_delay(&self, qubit: usize) -> f64 {
        self.xy_delays.get(qubit).copied().unwrap_or(0.0)
    }

    /// Flux line delay of `qubit`; missing entries are zero.
    pub fn z_delay(&self, qubit: usize) -> f64 {
        self.z_delays.get(qubit).copied().unwrap_or(0.0)
    }

    /// The configured pulse a gate on `qubit` builds on.
    ///
    /// Gates with embedded pulses get the drive pulse, which they ignore.
    pub fn base_pulse(&self, slot: PulseSlot, qubit: usize) -> CompileResult<Pulse> {
        let (name, pulses) = match slot {
            PulseSlot::Xy | PulseSlot::Embedded => ("xy", &self.xy),
            PulseSlot::Z => ("z", &self.z),
            PulseSlot::TwoQubit => ("two-qubit", &self.two_qubit),
            PulseSlot::Readout => ("readout", &self.readout_pulses),
        };
        let mut pulse = pulses
            .get(qubit)
            .cloned()
            .ok_or(CompileError::MissingPulse { slot: name, qubit })?;
        if slot == PulseSlot::Readout && self.readout.distribute_phases {
            pulse.phase = 2.0 * PI * READOUT_PHASES[qubit % MAX_QUBIT];
        }
        Ok(pulse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.n_qubit, 1);
        assert_eq!(config.sample_rate, 1.2e9);
        assert_eq!(config.n_points, 240_000);
        assert!(config.trim_to_sequence);
        assert!(config.local_xy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_counts() {
        assert!(matches!(
            CompilerConfig::new(10).validate(),
            Err(CompileError::Configuration(_))
        ));
        assert!(CompilerConfig::new(0).validate().is_err());
        let mut config = CompilerConfig::new(3);
        config.z.pop();
        assert!(matches!(
            config.validate(),
            Err(CompileError::MissingPulse { slot: "z", qubit: 2 })
        ));
    }

    #[test]
    fn test_default_pulses_fill_only_missing() {
        let config: CompilerConfig = serde_json::from_str(
            r#"{"n_qubit": 2, "xy": [{"shape": "square", "amplitude": 0.3}]}"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
        let config = config.with_default_pulses();
        assert!(config.validate().is_ok());
        assert_eq!(config.xy[0].amplitude, 0.3);
        assert_eq!(config.xy[1], Pulse::default());
        assert_eq!(config.two_qubit.len(), 1);
    }

    #[test]
    fn test_validate_rejects_sample_rate() {
        let config = CompilerConfig::new(1).with_sample_rate(0.0);
        assert!(config.validate().is_err());
        let config = CompilerConfig::new(1).with_sample_rate(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_two_qubit_pulse() {
        let config = CompilerConfig::new(2);
        assert!(config.base_pulse(PulseSlot::TwoQubit, 0).is_ok());
        assert!(matches!(
            config.base_pulse(PulseSlot::TwoQubit, 1),
            Err(CompileError::MissingPulse { qubit: 1, .. })
        ));
    }

    #[test]
    fn test_distributed_readout_phase() {
        let mut config = CompilerConfig::new(2);
        config.readout.distribute_phases = true;
        let pulse = config.base_pulse(PulseSlot::Readout, 1).unwrap();
        assert!((pulse.phase - 2.0 * PI * 0.2043214).abs() < 1e-12);
    }

    #[test]
    fn test_json_defaults_fill_in() {
        let config: CompilerConfig = serde_json::from_str(r#"{"n_qubit": 2}"#).unwrap();
        assert_eq!(config.first_delay, 100e-9);
        assert!(config.xy.is_empty());
        assert!(config.validate().is_err());
    }
}
