//! Tunable transmon frequency model.
//!
//! Maps flux bias voltage to qubit frequency for an asymmetric SQUID transmon,
//! and back. Used by adiabatic flux pulses to turn a frequency trajectory into
//! a voltage trajectory when the linear approximation is not good enough.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{PulseError, PulseResult};

/// Relative slack on the spectrum bounds, absorbs round-off at the sweet spot.
const SPECTRUM_TOLERANCE: f64 = 1e-9;

/// Asymmetric transmon with a flux-tunable SQUID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transmon {
    /// Maximum qubit frequency (upper sweet spot).
    pub f01_max: f64,
    /// Minimum qubit frequency; zero for a symmetric SQUID.
    pub f01_min: f64,
    /// Charging energy in Hz.
    pub ec: f64,
    /// Voltage corresponding to one flux quantum.
    pub v_period: f64,
    /// Voltage of the upper sweet spot.
    pub v_offset: f64,
    /// Operating point.
    pub v0: f64,
}

impl Transmon {
    /// Create a transmon model.
    pub fn new(f01_max: f64, f01_min: f64, ec: f64, v_period: f64, v_offset: f64, v0: f64) -> Self {
        Self {
            f01_max,
            f01_min,
            ec,
            v_period,
            v_offset,
            v0,
        }
    }

    /// Sum of the two Josephson energies.
    pub fn ej_sum(&self) -> f64 {
        (self.f01_max + self.ec).powi(2) / (8.0 * self.ec)
    }

    /// Junction asymmetry.
    pub fn asymmetry(&self) -> f64 {
        (self.f01_min + self.ec).powi(2) / (8.0 * self.ej_sum() * self.ec)
    }

    /// Qubit frequency at bias voltage `v`.
    pub fn v_to_f(&self, v: f64) -> f64 {
        let phi = PI * (v - self.v_offset) / self.v_period;
        let d = self.asymmetry();
        let tunable = phi.cos().abs() * (1.0 + d * d * phi.tan().powi(2)).sqrt();
        (8.0 * self.ej_sum() * self.ec * tunable).sqrt() - self.ec
    }

    /// Bias voltage that puts the qubit at frequency `f`.
    ///
    /// The solution is folded onto the same side of the sweet spot as the
    /// operating point and kept within one period.
    pub fn f_to_v(&self, f: f64) -> PulseResult<f64> {
        let slack = SPECTRUM_TOLERANCE * self.f01_max.abs();
        if f > self.f01_max + slack || f < self.f01_min - slack {
            return Err(PulseError::OutsideSpectrum {
                frequency: f,
                f_min: self.f01_min,
                f_max: self.f01_max,
            });
        }
        let d = self.asymmetry();
        if (d * d - 1.0).abs() < f64::EPSILON {
            return Err(PulseError::InvalidParameter {
                name: "f01_min",
                reason: "qubit is not tunable (f01_min equals f01_max)".to_string(),
            });
        }
        let f = f.clamp(self.f01_min, self.f01_max);
        let ej = (f + self.ec).powi(2) / (8.0 * self.ec);
        let ratio = ((ej * ej / self.ej_sum().powi(2) - 1.0) / (d * d - 1.0)).clamp(0.0, 1.0);
        let phi = ratio.sqrt().asin();
        let mut v = phi * self.v_period / PI + self.v_offset;

        if self.v0 >= self.v_offset {
            if v < self.v_offset {
                v = 2.0 * self.v_offset - v;
            }
        } else if v > self.v_offset {
            v = 2.0 * self.v_offset - v;
        }

        let v_min_pos = self.v_period / 2.0 + self.v_offset;
        let v_min_neg = -self.v_period / 2.0 + self.v_offset;
        if v > v_min_pos {
            v = 2.0 * v_min_pos - v;
        }
        if v < v_min_neg {
            v = 2.0 * v_min_neg - v;
        }
        Ok(v)
    }

    /// Voltage change needed for a frequency change `df` away from the operating point.
    pub fn df_to_dv(&self, df: f64) -> PulseResult<f64> {
        let f0 = self.v_to_f(self.v0);
        Ok(self.f_to_v(df + f0)? - self.v0)
    }
}
