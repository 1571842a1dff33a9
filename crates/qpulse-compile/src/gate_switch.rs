//! Microwave gate switch waveforms.
//!
//! The switch is open (1.0) wherever the drive line carries signal, widened
//! by an overlap on both sides, with short gaps closed. It always starts and
//! ends closed.

use num_complex::Complex64;

use crate::config::{GateSwitchConfig, ReadoutTrigger};

/// Gate switch for one drive waveform.
pub fn gate_switch(
    wave: &[Complex64],
    config: &GateSwitchConfig,
    trigger: Option<&ReadoutTrigger>,
    sample_rate: f64,
) -> Vec<f64> {
    let n = wave.len();
    if n == 0 {
        return vec![];
    }
    let mut gate = if config.uniform {
        let mut gate = vec![1.0; n];
        if let Some(trig) = trigger {
            // closed while the readout runs
            let off = ((trig.duration - config.overlap - config.delay) * sample_rate) as i64;
            if off > 0 {
                let off = (off as usize).min(n);
                gate[n - off..].fill(0.0);
            }
        }
        gate
    } else {
        let mut gate: Vec<f64> = wave
            .iter()
            .map(|c| if c.norm() > 0.0 { 1.0 } else { 0.0 })
            .collect();
        widen(&mut gate, (config.overlap * sample_rate).round() as usize);
        close_gaps(&mut gate, config.minimal_gate_time * sample_rate);
        shift(&gate, (config.delay * sample_rate).round() as i64)
    };
    gate[0] = 0.0;
    gate[n - 1] = 0.0;
    gate
}

/// Indices `i` where the gate rises (`gate[i] == 0`, `gate[i+1] == 1`) and
/// falls.
fn edges(gate: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let mut up = vec![];
    let mut down = vec![];
    for (i, pair) in gate.windows(2).enumerate() {
        if pair[1] > pair[0] {
            up.push(i);
        } else if pair[1] < pair[0] {
            down.push(i);
        }
    }
    (up, down)
}

fn widen(gate: &mut [f64], n_overlap: usize) {
    let n = gate.len();
    let (up, down) = edges(gate);
    for i in up {
        gate[i.saturating_sub(n_overlap)..=i].fill(1.0);
    }
    for i in down {
        gate[i..(i + n_overlap + 1).min(n)].fill(1.0);
    }
}

fn close_gaps(gate: &mut [f64], min_samples: f64) {
    let (mut up, down) = edges(gate);
    if gate[0] == 0.0 && !up.is_empty() {
        up.remove(0);
    }
    for (&d, &u) in down.iter().zip(&up) {
        if ((u as f64) - (d as f64)) < min_samples {
            gate[d..=u].fill(1.0);
        }
    }
}

fn shift(gate: &[f64], n_shift: i64) -> Vec<f64> {
    let n = gate.len();
    let k = (n_shift.unsigned_abs() as usize).min(n);
    let mut out = vec![0.0; n];
    if n_shift < 0 {
        out[..n - k].copy_from_slice(&gate[k..]);
    } else {
        out[k..].copy_from_slice(&gate[..n - k]);
    }
    out
}
