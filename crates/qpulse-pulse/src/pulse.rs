//! The pulse value type.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::adiabatic::{self, AdiabaticParams};
use crate::envelope;
use crate::error::PulseResult;
use crate::interp::gradient;
use crate::shape::{PulseKind, PulseShape};

/// A physical pulse as played by an arbitrary waveform generator.
///
/// Pulses are plain values: gates copy and adjust them per use, and a render
/// never mutates the configured pulse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pulse {
    /// Envelope shape.
    pub shape: PulseShape,
    /// Output line.
    pub kind: PulseKind,
    /// Peak amplitude.
    pub amplitude: f64,
    /// Characteristic width in seconds.
    pub width: f64,
    /// Flat-top length in seconds.
    pub plateau: f64,
    /// Single-sideband frequency in Hz.
    pub frequency: f64,
    /// Carrier phase in radians.
    pub phase: f64,
    /// Apply DRAG correction.
    pub use_drag: bool,
    /// DRAG scaling, in seconds.
    pub drag_coefficient: f64,
    /// Frequency of the DRAG phase ramp, in Hz.
    pub drag_detuning: f64,
    /// Gaussian support in units of `width`.
    pub truncation_range: f64,
    /// Shift and rescale a Gaussian so it starts at exactly zero.
    pub start_at_zero: bool,
    /// I/Q amplitude ratio of the mixer.
    pub iq_ratio: f64,
    /// I/Q phase skew of the mixer, in radians.
    pub iq_skew: f64,
    /// Adiabatic flux parameters; ignored by the analytic shapes.
    pub adiabatic: AdiabaticParams,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            shape: PulseShape::Gaussian,
            kind: PulseKind::Xy,
            amplitude: 0.5,
            width: 10e-9,
            plateau: 0.0,
            frequency: 0.0,
            phase: 0.0,
            use_drag: false,
            drag_coefficient: 0.0,
            drag_detuning: 0.0,
            truncation_range: 5.0,
            start_at_zero: false,
            iq_ratio: 1.0,
            iq_skew: 0.0,
            adiabatic: AdiabaticParams::default(),
        }
    }
}

impl Pulse {
    /// Create a pulse of the given shape with default parameters.
    pub fn new(shape: PulseShape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    /// Set the output line.
    #[must_use]
    pub fn with_kind(mut self, kind: PulseKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the amplitude.
    #[must_use]
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set the width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the plateau.
    #[must_use]
    pub fn with_plateau(mut self, plateau: f64) -> Self {
        self.plateau = plateau;
        self
    }

    /// Set the SSB frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the phase.
    #[must_use]
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Enable DRAG with the given coefficient.
    #[must_use]
    pub fn with_drag(mut self, coefficient: f64) -> Self {
        self.use_drag = true;
        self.drag_coefficient = coefficient;
        self
    }

    /// Set the DRAG detuning.
    #[must_use]
    pub fn with_drag_detuning(mut self, detuning: f64) -> Self {
        self.drag_detuning = detuning;
        self
    }

    /// Set the Gaussian truncation range.
    #[must_use]
    pub fn with_truncation_range(mut self, range: f64) -> Self {
        self.truncation_range = range;
        self
    }

    /// Force a Gaussian to start at zero.
    #[must_use]
    pub fn with_start_at_zero(mut self, start_at_zero: bool) -> Self {
        self.start_at_zero = start_at_zero;
        self
    }

    /// Set mixer I/Q ratio and skew.
    #[must_use]
    pub fn with_iq_correction(mut self, ratio: f64, skew: f64) -> Self {
        self.iq_ratio = ratio;
        self.iq_skew = skew;
        self
    }

    /// Set adiabatic flux parameters.
    #[must_use]
    pub fn with_adiabatic(mut self, params: AdiabaticParams) -> Self {
        self.adiabatic = params;
        self
    }

    /// Total length of the pulse support, in seconds. Never negative.
    pub fn total_duration(&self) -> f64 {
        let duration = match self.shape {
            PulseShape::Gaussian => self.truncation_range * self.width + self.plateau,
            PulseShape::Ramp => 2.0 * self.width + self.plateau,
            PulseShape::Square | PulseShape::Cosine | PulseShape::AdiabaticFlux => {
                self.width + self.plateau
            }
            PulseShape::NetZero => 2.0 * self.net_zero_half().total_duration(),
        };
        duration.max(0.0)
    }

    /// The single adiabatic pulse that makes up each half of a net-zero pulse.
    pub fn net_zero_half(&self) -> Pulse {
        Pulse {
            shape: PulseShape::AdiabaticFlux,
            width: self.width / 2.0,
            plateau: self.plateau / 2.0,
            ..self.clone()
        }
    }

    /// Real envelope centered at `t0`, one sample per entry of `t`.
    ///
    /// Samples strictly outside `[t0 - d/2, t0 + d/2]` are zero, where `d` is
    /// [`total_duration`](Self::total_duration).
    pub fn envelope(&self, t0: f64, t: &[f64]) -> PulseResult<Vec<f64>> {
        let mut values = match self.shape {
            PulseShape::Gaussian => envelope::gaussian(self, t0, t),
            PulseShape::Square => envelope::square(self, t0, t),
            PulseShape::Ramp => envelope::ramp(self, t0, t),
            PulseShape::Cosine => envelope::cosine(self, t0, t),
            PulseShape::AdiabaticFlux => adiabatic::adiabatic_flux(self, t0, t)?,
            PulseShape::NetZero => adiabatic::net_zero(self, t0, t)?,
        };
        debug_assert_eq!(values.len(), t.len());

        let half = self.total_duration() / 2.0;
        for (v, &ti) in values.iter_mut().zip(t) {
            if ti < t0 - half || ti > t0 + half {
                *v = 0.0;
            }
        }
        Ok(values)
    }

    /// Full waveform: envelope, DRAG and single-sideband mixing.
    ///
    /// Flux pulses come back as real values in the real part.
    pub fn waveform(&self, t0: f64, t: &[f64]) -> PulseResult<Vec<Complex64>> {
        let envelope = self.envelope(t0, t)?;
        if !self.kind.is_complex() {
            return Ok(envelope.into_iter().map(|v| Complex64::new(v, 0.0)).collect());
        }

        let mut y: Vec<Complex64> = if self.use_drag && t.len() > 1 {
            let beta = self.drag_coefficient / (t[1] - t[0]);
            let slope = gradient(&envelope);
            let start = t0 - self.total_duration() / 2.0;
            envelope
                .iter()
                .zip(&slope)
                .zip(t)
                .map(|((&v, &dv), &ti)| {
                    let corrected = Complex64::new(v, beta * dv);
                    corrected * Complex64::from_polar(1.0, 2.0 * PI * self.drag_detuning * (ti - start))
                })
                .collect()
        } else {
            envelope.into_iter().map(|v| Complex64::new(v, 0.0)).collect()
        };

        let omega = 2.0 * PI * self.frequency;
        for (sample, &ti) in y.iter_mut().zip(t) {
            let arg = omega * ti - self.phase;
            let i = self.iq_ratio * (sample.re * arg.cos() - sample.im * (arg + FRAC_PI_2).cos());
            let q = sample.re * (arg + self.iq_skew).sin()
                - sample.im * (arg + self.iq_skew + FRAC_PI_2).sin();
            *sample = Complex64::new(i, q);
        }
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::linspace;

    #[test]
    fn test_total_duration_per_shape() {
        let base = Pulse::default().with_width(10e-9).with_plateau(4e-9);
        let d = |shape| Pulse { shape, ..base.clone() }.total_duration();
        assert!((d(PulseShape::Gaussian) - 54e-9).abs() < 1e-18);
        assert!((d(PulseShape::Square) - 14e-9).abs() < 1e-18);
        assert!((d(PulseShape::Ramp) - 24e-9).abs() < 1e-18);
        assert!((d(PulseShape::Cosine) - 14e-9).abs() < 1e-18);
        assert!((d(PulseShape::AdiabaticFlux) - 14e-9).abs() < 1e-18);
        assert!((d(PulseShape::NetZero) - 14e-9).abs() < 1e-18);
    }

    #[test]
    fn test_negative_width_clamps_duration() {
        let p = Pulse::new(PulseShape::Square).with_width(-5e-9);
        assert_eq!(p.total_duration(), 0.0);
    }

    #[test]
    fn test_waveform_without_ssb_is_real() {
        let p = Pulse::default();
        let t = linspace(-25e-9, 25e-9, 61);
        let y = p.waveform(0.0, &t).unwrap();
        assert!(y.iter().all(|c| c.im == 0.0));
    }

    #[test]
    fn test_phase_pi_flips_in_phase_component() {
        let t = linspace(-25e-9, 25e-9, 61);
        let plain = Pulse::default().waveform(0.0, &t).unwrap();
        let flipped = Pulse::default().with_phase(PI).waveform(0.0, &t).unwrap();
        for (a, b) in plain.iter().zip(&flipped) {
            assert!((a.re + b.re).abs() < 1e-12);
            assert!(b.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_drag_quadrature_is_derivative() {
        let t = linspace(-25e-9, 25e-9, 101);
        let p = Pulse::default().with_drag(1e-9);
        let y = p.waveform(0.0, &t).unwrap();
        // Rising edge has positive slope, falling edge negative. With SSB at
        // zero frequency the quadrature shows up with opposite sign in Q.
        assert!(y[40].im < 0.0);
        assert!(y[60].im > 0.0);
        assert!(y[50].im.abs() < 1e-9);
    }

    #[test]
    fn test_flux_kind_skips_mixing() {
        let p = Pulse::new(PulseShape::Square)
            .with_kind(PulseKind::Z)
            .with_frequency(100e6)
            .with_drag(1e-9);
        let t = linspace(-10e-9, 10e-9, 21);
        let y = p.waveform(0.0, &t).unwrap();
        assert!(y.iter().all(|c| c.im == 0.0 && (c.re == 0.0 || c.re == 0.5)));
    }

    #[test]
    fn test_pulse_deserializes_with_defaults() {
        let p: Pulse = serde_json::from_str(r#"{"shape": "Square", "width": 2e-8}"#).unwrap();
        assert_eq!(p.shape, PulseShape::Square);
        assert_eq!(p.amplitude, 0.5);
        assert_eq!(p.width, 2e-8);
    }
}
