//! Step timing and virtual-Z propagation.
//!
//! A [`Schedule`] is a sequence whose timings are fixed: every step has a
//! start, middle and end, steps are in chronological order, empty slots hold
//! zero-width identities and virtual-Z phases have been pushed into the
//! gates that follow them.

use tracing::{debug, warn};

use qpulse_ir::{Alignment, Gate, Sequence, Step};

use crate::config::CompilerConfig;
use crate::error::{CompileError, CompileResult};

const TIME_RESOLUTION: f64 = 1e-12;

/// Round a time to the picosecond grid used for all step timings.
pub fn round_time(t: f64) -> f64 {
    (t / TIME_RESOLUTION).round() * TIME_RESOLUTION
}

/// A step with resolved timing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledStep {
    /// One gate per qubit.
    pub gates: Vec<Gate>,
    /// Alignment of shorter gates.
    pub align: Alignment,
    /// Start time in seconds.
    pub start: f64,
    /// Middle time in seconds.
    pub middle: f64,
    /// End time in seconds.
    pub end: f64,
}

impl ScheduledStep {
    /// Length of the step.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether any gate is a readout.
    pub fn has_readout(&self) -> bool {
        self.gates.iter().any(Gate::is_readout)
    }

    pub(crate) fn shift(&mut self, dt: f64) {
        self.start = round_time(self.start + dt);
        self.middle = round_time(self.middle + dt);
        self.end = round_time(self.end + dt);
    }
}

/// A fully timed sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    n_qubit: usize,
    steps: Vec<ScheduledStep>,
}

impl Schedule {
    /// Number of qubits.
    pub fn n_qubit(&self) -> usize {
        self.n_qubit
    }

    /// Timed steps in chronological order.
    pub fn steps(&self) -> &[ScheduledStep] {
        &self.steps
    }

    /// End of the last step.
    pub fn end(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.end)
    }

    /// Fix the timing of every step of `seq`.
    pub fn new(seq: &Sequence, config: &CompilerConfig) -> CompileResult<Self> {
        if seq.n_qubit() != config.n_qubit {
            return Err(CompileError::Configuration(format!(
                "sequence has {} qubits, compiler is configured for {}",
                seq.n_qubit(),
                config.n_qubit
            )));
        }
        if seq.is_empty() {
            return Err(CompileError::EmptySequence);
        }

        let steps = separate(seq.steps(), config.simultaneous_pulses);
        let mut timed = Vec::with_capacity(steps.len());
        let mut prev_end = None;
        for (index, step) in steps.iter().enumerate() {
            let gates = fill_identities(step, index)?;
            let mut duration = 0.0_f64;
            for (qubit, gate) in gates.iter().enumerate() {
                let d = match gate.pulse_slot() {
                    Some(slot) => gate.duration(&config.base_pulse(slot, qubit)?),
                    None => 0.0,
                };
                duration = duration.max(d);
            }
            if duration == 0.0 && gates.iter().any(|g| !g.is_identity() && !g.is_virtual()) {
                warn!(step = index, "zero-duration step holds a physical gate");
            }

            let placement = step.placement();
            let start = match placement.t0 {
                Some(t0) => t0 - duration / 2.0,
                None => {
                    let dt = placement.dt.unwrap_or(config.pulse_spacing);
                    let prev = prev_end.unwrap_or(config.first_delay - dt);
                    if duration == 0.0 { prev } else { prev + dt }
                }
            };
            let start = round_time(start);
            let end = round_time(start + duration);
            prev_end = Some(end);
            timed.push(ScheduledStep {
                gates,
                align: placement.align,
                start,
                middle: start + duration / 2.0,
                end,
            });
        }

        timed.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.end.total_cmp(&b.end)));

        let diff = round_time(config.first_delay - timed[0].start);
        if diff.abs() > 1e-10 {
            for step in &mut timed {
                step.shift(diff);
            }
        }

        propagate_virtual_z(&mut timed, config.n_qubit);
        debug!(
            steps = timed.len(),
            end = timed.last().map_or(0.0, |s| s.end),
            "scheduled sequence"
        );
        Ok(Self {
            n_qubit: config.n_qubit,
            steps: timed,
        })
    }

    pub(crate) fn shift(&mut self, dt: f64) {
        for step in &mut self.steps {
            step.shift(dt);
        }
    }
}

/// Split multi-gate steps into one step per gate, keeping readout and
/// identity steps whole for multiplexed readout.
fn separate(steps: &[Step], simultaneous: bool) -> Vec<Step> {
    if simultaneous {
        return steps.to_vec();
    }
    let mut out = Vec::with_capacity(steps.len());
    for step in steps {
        let keep = step
            .gates()
            .iter()
            .flatten()
            .any(|g| g.is_readout() || g.is_identity());
        if keep {
            out.push(step.clone());
            continue;
        }
        for (qubit, gate) in step.gates().iter().enumerate() {
            if gate.is_some() {
                out.push(step.isolate(qubit));
            }
        }
    }
    out
}

fn fill_identities(step: &Step, index: usize) -> CompileResult<Vec<Gate>> {
    step.gates()
        .iter()
        .map(|slot| match slot {
            Some(Gate::Composite(_)) => Err(CompileError::UnexpandedComposite { step: index }),
            Some(gate) => Ok(gate.clone()),
            None => Ok(Gate::spacer(0.0)),
        })
        .collect()
}

fn propagate_virtual_z(steps: &mut [ScheduledStep], n_qubit: usize) {
    for qubit in 0..n_qubit {
        let mut phase = 0.0;
        for step in steps.iter_mut() {
            let gate = &step.gates[qubit];
            if let Gate::VirtualZ { angle } = gate {
                phase += angle;
                continue;
            }
            if !gate.is_readout() && phase != 0.0 {
                step.gates[qubit] = gate.add_phase(phase);
            }
        }
    }
}
