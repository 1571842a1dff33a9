//! Waveform rendering.

use num_complex::Complex64;
use tracing::{debug, info, instrument, trace};

use qpulse_ir::{Alignment, Sequence};
use qpulse_pulse::PulseKind;

use crate::config::CompilerConfig;
use crate::crosstalk;
use crate::error::CompileResult;
use crate::gate_switch::gate_switch;
use crate::readout::readout_trigger;
use crate::schedule::{round_time, Schedule, ScheduledStep};
use crate::waveforms::Waveforms;

/// Turns sequences into waveforms.
///
/// Compilation runs in two stages: [`schedule`](Self::schedule) fixes the
/// timing and phases, [`render`](Self::render) samples the pulses. Both are
/// pure, so compiling the same sequence twice gives identical output.
#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompilerConfig,
    crosstalk_inverse: Option<Vec<Vec<f64>>>,
}

impl Compiler {
    /// Create a compiler; the configuration is validated here.
    pub fn new(config: CompilerConfig) -> CompileResult<Self> {
        config.validate()?;
        let crosstalk_inverse = config
            .crosstalk
            .as_deref()
            .map(crosstalk::invert)
            .transpose()?;
        Ok(Self {
            config,
            crosstalk_inverse,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Fix timings and propagate virtual-Z phases.
    pub fn schedule(&self, seq: &Sequence) -> CompileResult<Schedule> {
        Schedule::new(seq, &self.config)
    }

    /// Schedule and render in one go.
    #[instrument(skip_all, fields(n_qubit = seq.n_qubit(), steps = seq.len()))]
    pub fn compile(&self, seq: &Sequence) -> CompileResult<Waveforms> {
        let schedule = self.schedule(seq)?;
        self.render(&schedule)
    }

    /// Sample every gate of a schedule.
    pub fn render(&self, schedule: &Schedule) -> CompileResult<Waveforms> {
        let config = &self.config;
        let sr = config.sample_rate;
        let n_qubit = config.n_qubit;
        let steps = schedule.steps();
        let Some(last) = steps.last() else {
            return Err(crate::error::CompileError::EmptySequence);
        };

        let (xy_delays, z_delays) = normalized_delays(config);
        let max_delay = xy_delays
            .iter()
            .chain(&z_delays)
            .copied()
            .fold(0.0, f64::max);

        let sized = if config.readout.match_main_size || !last.has_readout() || steps.len() == 1 {
            steps
        } else {
            &steps[..steps.len() - 1]
        };
        let end = sized.iter().map(|s| s.end).fold(f64::NEG_INFINITY, f64::max) + max_delay;

        let n_points = if config.trim_to_sequence {
            even((end * sr).ceil().max(0.0) as usize + 1)
        } else {
            config.n_points
        };
        let n_readout = if config.readout.match_main_size {
            n_points
        } else {
            even(1 + (sr * (last.end - last.start)).ceil().max(0.0) as usize)
        };
        debug!(n_points, n_readout, "allocated waveforms");
        let mut wf = Waveforms::zeros(n_qubit, n_points, n_readout, sr);

        let mut schedule = schedule.clone();
        if config.align_to_end {
            let shift = round_time((n_points as f64 - 2.0) / sr - last.end);
            schedule.shift(shift);
        }

        for step in schedule.steps() {
            self.render_step(step, &xy_delays, &z_delays, &mut wf)?;
        }

        if !config.local_xy {
            let (first, rest) = wf.xy.split_at_mut(1);
            for wave in rest.iter_mut() {
                for (acc, v) in first[0].iter_mut().zip(wave.iter_mut()) {
                    *acc += *v;
                    *v = Complex64::new(0.0, 0.0);
                }
            }
        }

        if let Some(inverse) = &self.crosstalk_inverse {
            crosstalk::compensate(&mut wf.z, inverse);
        }

        if let Some(trigger) = &config.readout.trigger {
            wf.readout_trig = readout_trigger(&wf.readout_iq, trigger, sr);
        }

        if let Some(switch) = &config.gate_switch {
            let n_wave = if config.local_xy { n_qubit } else { 1 };
            for n in 0..n_wave {
                wf.gate[n] = gate_switch(&wf.xy[n], switch, config.readout.trigger.as_ref(), sr);
            }
        }

        let offset = Complex64::new(config.readout.i_offset, config.readout.q_offset);
        for v in &mut wf.readout_iq {
            *v += offset;
        }

        info!(
            steps = schedule.steps().len(),
            n_points,
            duration = n_points as f64 / sr,
            "rendered waveforms"
        );
        Ok(wf)
    }

    fn render_step(
        &self,
        step: &ScheduledStep,
        xy_delays: &[f64],
        z_delays: &[f64],
        wf: &mut Waveforms,
    ) -> CompileResult<()> {
        let config = &self.config;
        let sr = config.sample_rate;
        for (qubit, gate) in step.gates.iter().enumerate() {
            let Some(slot) = gate.pulse_slot() else {
                continue;
            };
            let base = config.base_pulse(slot, qubit)?;
            let Some(pulse) = gate.adjusted_pulse(&base) else {
                continue;
            };

            let (start, middle, end, len) = match pulse.kind {
                PulseKind::Readout if !config.readout.match_main_size => (
                    0.0,
                    round_time(step.middle - step.start),
                    round_time(step.end - step.start),
                    wf.readout_iq.len(),
                ),
                kind => {
                    let delay = match kind {
                        PulseKind::Z => z_delays[qubit],
                        PulseKind::Xy => xy_delays[qubit],
                        PulseKind::Readout => 0.0,
                    };
                    let len = match kind {
                        PulseKind::Readout => wf.readout_iq.len(),
                        _ => wf.n_points(),
                    };
                    (
                        round_time(step.start + delay),
                        round_time(step.middle + delay),
                        round_time(step.end + delay),
                        len,
                    )
                }
            };

            let lo = (start * sr).floor().max(0.0) as usize;
            let hi = ((end * sr).ceil().max(0.0) as usize).min(len);
            if lo >= hi {
                trace!(qubit, start, end, "gate outside waveform");
                continue;
            }
            let t: Vec<f64> = (lo..hi).map(|i| i as f64 / sr).collect();

            let slack = (end - start - pulse.total_duration()) / 2.0;
            let t0 = match step.align {
                Alignment::Center => middle,
                Alignment::Left => middle - slack,
                Alignment::Right => middle + slack,
            };
            let samples = gate.render(&base, t0, &t)?;

            match pulse.kind {
                PulseKind::Z => {
                    for (acc, v) in wf.z[qubit][lo..hi].iter_mut().zip(&samples) {
                        *acc += v.re;
                    }
                }
                PulseKind::Xy => {
                    for (acc, v) in wf.xy[qubit][lo..hi].iter_mut().zip(&samples) {
                        *acc += *v;
                    }
                }
                PulseKind::Readout => {
                    for (acc, v) in wf.readout_iq[lo..hi].iter_mut().zip(&samples) {
                        *acc += *v;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Line delays shifted so that the smallest one is zero.
fn normalized_delays(config: &CompilerConfig) -> (Vec<f64>, Vec<f64>) {
    let n = config.n_qubit;
    let xy: Vec<f64> = (0..n).map(|q| config.xy_delay(q)).collect();
    let z: Vec<f64> = (0..n).map(|q| config.z_delay(q)).collect();
    let min = xy.iter().chain(&z).copied().fold(f64::INFINITY, f64::min);
    (
        xy.iter().map(|d| d - min).collect(),
        z.iter().map(|d| d - min).collect(),
    )
}

/// Round up to an even sample count; odd lengths leak in FFTs.
fn even(n: usize) -> usize {
    if n % 2 == 1 { n + 1 } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpulse_ir::{from_name, Gate, Placement};

    fn compiler(config: CompilerConfig) -> Compiler {
        Compiler::new(config).unwrap()
    }

    #[test]
    fn test_trimmed_length_is_even() {
        let c = compiler(CompilerConfig::new(1));
        let mut seq = Sequence::new(1).unwrap();
        seq.add_single(0, from_name("Xp").unwrap()).unwrap();
        let wf = c.compile(&seq).unwrap();
        // 150 ns at 1.2 GS/s
        assert_eq!(wf.n_points(), 182);
        assert_eq!(wf.n_points() % 2, 0);
    }

    #[test]
    fn test_fixed_canvas() {
        let mut config = CompilerConfig::new(1);
        config.trim_to_sequence = false;
        config.n_points = 1000;
        let mut seq = Sequence::new(1).unwrap();
        seq.add_single(0, from_name("Xp").unwrap()).unwrap();
        let wf = compiler(config).compile(&seq).unwrap();
        assert_eq!(wf.n_points(), 1000);
    }

    #[test]
    fn test_window_outside_canvas_is_dropped() {
        let mut config = CompilerConfig::new(1);
        config.trim_to_sequence = false;
        config.n_points = 200;
        let mut seq = Sequence::new(1).unwrap();
        seq.add_single(0, from_name("Xp").unwrap()).unwrap();
        seq.add_gate_at(&[0], vec![from_name("Xp").unwrap()], Placement::at(5e-6))
            .unwrap();
        let wf = compiler(config).compile(&seq).unwrap();
        assert_eq!(wf.n_points(), 200);
        assert!(wf.xy[0].iter().any(|v| v.norm() > 0.0));
    }

    #[test]
    fn test_shared_drive_line() {
        let mut config = CompilerConfig::new(2);
        config.local_xy = false;
        let mut seq = Sequence::new(2).unwrap();
        seq.add_gate_to_all(from_name("Xp").unwrap(), Placement::default())
            .unwrap();
        let wf = compiler(config).compile(&seq).unwrap();
        assert!(wf.xy[1].iter().all(|v| v.norm() == 0.0));
        let peak = wf.xy[0].iter().map(|v| v.re).fold(0.0, f64::max);
        assert!((peak - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_readout_window_and_offsets() {
        let mut config = CompilerConfig::new(1);
        config.readout.i_offset = 0.01;
        config.readout.trigger = Some(crate::config::ReadoutTrigger {
            amplitude: 1.0,
            duration: 200e-9,
        });
        let mut seq = Sequence::new(1).unwrap();
        seq.add_single(0, from_name("Xp").unwrap()).unwrap();
        seq.add_gate_to_all(
            Gate::readout(),
            Placement::after(0.0).with_align(Alignment::Left),
        )
        .unwrap();
        let wf = compiler(config).compile(&seq).unwrap();
        // main waveform ends with the drive pulse, readout has its own length
        assert_eq!(wf.n_points(), 182);
        assert_eq!(wf.readout_iq.len(), 1202);
        assert!(wf.readout_iq.iter().all(|v| (v.re - 0.01).abs() < 0.2));
        assert!(wf.readout_trig.iter().any(|&v| v == 1.0));
        assert_eq!(wf.readout_trig[0], 0.0);
    }

    #[test]
    fn test_align_to_end() {
        let mut config = CompilerConfig::new(1);
        config.trim_to_sequence = false;
        config.align_to_end = true;
        config.n_points = 1200;
        let mut seq = Sequence::new(1).unwrap();
        seq.add_single(0, from_name("Xp").unwrap()).unwrap();
        let wf = compiler(config).compile(&seq).unwrap();
        let first = wf.xy[0].iter().position(|v| v.norm() > 1e-9).unwrap();
        assert!(first > 1000);
    }

    #[test]
    fn test_xy_delay_shifts_drive() {
        let mut config = CompilerConfig::new(1);
        config.xy_delays = vec![20e-9];
        config.z_delays = vec![0.0];
        let mut seq = Sequence::new(1).unwrap();
        seq.add_single(0, from_name("Xp").unwrap()).unwrap();
        let wf = compiler(config).compile(&seq).unwrap();
        let peak = wf.xy[0]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.re.total_cmp(&b.1.re))
            .map(|(i, _)| i)
            .unwrap();
        // center at 125 ns + 20 ns
        assert_eq!(peak, 174);
    }

    #[test]
    fn test_flux_pulse_goes_to_z() {
        let c = compiler(CompilerConfig::new(1));
        let mut seq = Sequence::new(1).unwrap();
        seq.add_single(0, from_name("Z2p").unwrap()).unwrap();
        let wf = c.compile(&seq).unwrap();
        assert!(wf.z[0].iter().any(|&v| v > 0.0));
        assert!(wf.xy[0].iter().all(|v| v.norm() == 0.0));
    }
}
