//! Base envelopes for the analytic pulse shapes.
//!
//! Every function returns exactly one sample per entry of `t`. Zeroing
//! outside the pulse support is done by the caller in [`Pulse::envelope`].
//!
//! [`Pulse::envelope`]: crate::Pulse::envelope

use std::f64::consts::PI;

use crate::pulse::Pulse;

/// Gaussian, optionally with a flat top of length `plateau`.
///
/// The standard deviation is `width / sqrt(2π)`, which gives the same area as
/// a square pulse of equal width.
pub fn gaussian(pulse: &Pulse, t0: f64, t: &[f64]) -> Vec<f64> {
    let std = pulse.width / (2.0 * PI).sqrt();
    let two_var = 2.0 * std * std;
    let half_plateau = pulse.plateau / 2.0;

    let mut values: Vec<f64> = if pulse.plateau == 0.0 {
        if std > 0.0 {
            t.iter().map(|&ti| (-(ti - t0).powi(2) / two_var).exp()).collect()
        } else {
            vec![0.0; t.len()]
        }
    } else {
        t.iter()
            .map(|&ti| {
                let start = t0 - half_plateau;
                let end = t0 + half_plateau;
                if ti >= start && ti < end {
                    1.0
                } else if std <= 0.0 {
                    0.0
                } else if ti < start {
                    (-(ti - start).powi(2) / two_var).exp()
                } else {
                    (-(ti - end).powi(2) / two_var).exp()
                }
            })
            .collect()
    };

    if pulse.start_at_zero && !values.is_empty() {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        for v in &mut values {
            *v -= min;
        }
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max > 0.0 {
            for v in &mut values {
                *v /= max;
            }
        }
    }

    for v in &mut values {
        *v *= pulse.amplitude;
    }
    values
}

/// Top-hat of `width + plateau`, edges shifted by half a sample.
pub fn square(pulse: &Pulse, t0: f64, t: &[f64]) -> Vec<f64> {
    let t0 = if t.len() > 1 { t0 + (t[1] - t[0]) / 2.0 } else { t0 };
    let half = (pulse.width + pulse.plateau) / 2.0;
    t.iter()
        .map(|&ti| {
            if ti >= t0 - half && ti < t0 + half {
                pulse.amplitude
            } else {
                0.0
            }
        })
        .collect()
}

/// Linear rise and fall of length `width` around a plateau.
pub fn ramp(pulse: &Pulse, t0: f64, t: &[f64]) -> Vec<f64> {
    let half_plateau = pulse.plateau / 2.0;
    if pulse.width <= 0.0 {
        return t
            .iter()
            .map(|&ti| {
                if ti >= t0 - half_plateau && ti <= t0 + half_plateau {
                    pulse.amplitude
                } else {
                    0.0
                }
            })
            .collect();
    }
    t.iter()
        .map(|&ti| {
            let rise = ((ti - (t0 - half_plateau - pulse.width)) / pulse.width).clamp(0.0, 1.0);
            let fall = (((t0 + half_plateau + pulse.width) - ti) / pulse.width).clamp(0.0, 1.0);
            rise * fall * pulse.amplitude
        })
        .collect()
}

/// Raised cosine of period `width` split around an optional plateau.
pub fn cosine(pulse: &Pulse, t0: f64, t: &[f64]) -> Vec<f64> {
    let tau = pulse.width;
    let amp = pulse.amplitude;
    let half_plateau = pulse.plateau / 2.0;
    let raised = |x: f64| {
        if tau > 0.0 {
            amp / 2.0 * (1.0 - (2.0 * PI * x / tau).cos())
        } else {
            0.0
        }
    };

    if pulse.plateau == 0.0 {
        return t.iter().map(|&ti| raised(ti - t0 + tau / 2.0)).collect();
    }
    t.iter()
        .map(|&ti| {
            if ti < t0 - half_plateau {
                raised(ti - t0 + half_plateau + tau / 2.0)
            } else if ti > t0 + half_plateau {
                raised(ti - t0 - half_plateau + tau / 2.0)
            } else {
                amp
            }
        })
        .collect()
}
