//! Rendered output.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use qpulse_pulse::interp::interp;

use crate::error::{CompileError, CompileResult};

/// Per-qubit and shared waveforms of one compiled sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveforms {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Drive I/Q waveform per qubit.
    pub xy: Vec<Vec<Complex64>>,
    /// Flux waveform per qubit.
    pub z: Vec<Vec<f64>>,
    /// Microwave gate switch waveform per qubit.
    pub gate: Vec<Vec<f64>>,
    /// Shared readout trigger.
    pub readout_trig: Vec<f64>,
    /// Shared readout I/Q waveform.
    pub readout_iq: Vec<Complex64>,
}

impl Waveforms {
    pub(crate) fn zeros(n_qubit: usize, n_points: usize, n_readout: usize, sample_rate: f64) -> Self {
        Self {
            sample_rate,
            xy: vec![vec![Complex64::new(0.0, 0.0); n_points]; n_qubit],
            z: vec![vec![0.0; n_points]; n_qubit],
            gate: vec![vec![0.0; n_points]; n_qubit],
            readout_trig: vec![0.0; n_readout],
            readout_iq: vec![Complex64::new(0.0, 0.0); n_readout],
        }
    }

    /// Number of samples in the main waveforms.
    pub fn n_points(&self) -> usize {
        self.xy.first().map_or(0, Vec::len)
    }

    /// Sample times of the main waveforms.
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.n_points())
            .map(|i| i as f64 / self.sample_rate)
            .collect()
    }

    /// Add an externally generated drive waveform to `qubit`.
    ///
    /// `samples` start at `t_start` and are spaced by `1 / sample_rate`.
    /// They are linearly interpolated onto this waveform's time grid; points
    /// outside the supplied range get nothing.
    pub fn overlay_xy(
        &mut self,
        qubit: usize,
        samples: &[Complex64],
        sample_rate: f64,
        t_start: f64,
    ) -> CompileResult<()> {
        if !(sample_rate > 0.0) {
            return Err(CompileError::Configuration(format!(
                "overlay sample rate must be positive, got {sample_rate}"
            )));
        }
        let own_rate = self.sample_rate;
        let wave = self.xy.get_mut(qubit).ok_or_else(|| {
            CompileError::Configuration(format!("no drive waveform for qubit {qubit}"))
        })?;
        if samples.is_empty() {
            return Ok(());
        }

        let xp: Vec<f64> = (0..samples.len())
            .map(|i| t_start + i as f64 / sample_rate)
            .collect();
        let re: Vec<f64> = samples.iter().map(|c| c.re).collect();
        let im: Vec<f64> = samples.iter().map(|c| c.im).collect();
        let first = xp[0];
        let last = xp[xp.len() - 1];
        for (i, value) in wave.iter_mut().enumerate() {
            let t = i as f64 / own_rate;
            if t < first || t > last {
                continue;
            }
            *value += Complex64::new(interp(t, &xp, &re), interp(t, &xp, &im));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_interpolates() {
        let mut wf = Waveforms::zeros(1, 8, 2, 1e9);
        // 0.5 GS/s ramp from 0 to 3 over 6 ns
        let samples: Vec<Complex64> = (0..4).map(|i| Complex64::new(i as f64, -(i as f64))).collect();
        wf.overlay_xy(0, &samples, 0.5e9, 0.0).unwrap();
        assert!((wf.xy[0][1].re - 0.5).abs() < 1e-12);
        assert!((wf.xy[0][3].im + 1.5).abs() < 1e-12);
        assert!((wf.xy[0][6].re - 3.0).abs() < 1e-12);
        assert_eq!(wf.xy[0][7], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_overlay_rejects_bad_input() {
        let mut wf = Waveforms::zeros(1, 4, 2, 1e9);
        assert!(wf.overlay_xy(1, &[], 1e9, 0.0).is_err());
        assert!(wf.overlay_xy(0, &[], 0.0, 0.0).is_err());
    }
}
