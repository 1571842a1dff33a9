//! Sequence generators and the standard sequence frame.

use qpulse_pulse::Pulse;
use tracing::debug;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::sequence::Sequence;
use crate::step::{Alignment, Placement};
use crate::tomography::{ProcessTomography, StateTomography};

/// What a generator may know about the qubits it writes for.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorContext {
    /// Number of qubits.
    pub n_qubit: usize,
    /// Drive pulse of each qubit.
    pub xy: Vec<Pulse>,
}

impl GeneratorContext {
    /// Context with the given drive pulses, one per qubit.
    pub fn new(xy: Vec<Pulse>) -> Self {
        Self {
            n_qubit: xy.len(),
            xy,
        }
    }

    /// Drive pulse of `qubit`.
    pub fn xy_pulse(&self, qubit: usize) -> IrResult<&Pulse> {
        self.xy.get(qubit).ok_or(IrError::QubitOutOfRange {
            qubit,
            n_qubit: self.n_qubit,
        })
    }

    /// All qubit indices.
    pub fn all_qubits(&self) -> Vec<usize> {
        (0..self.n_qubit).collect()
    }
}

/// Produces the body of a sequence.
///
/// Generators only append the experiment itself; [`build_sequence`] wraps
/// it with tomography pulses and the final readout.
pub trait SequenceGenerator {
    /// Error type; generator failures must be able to carry IR errors.
    type Error: From<IrError>;

    /// Get the name of this generator.
    fn name(&self) -> &str;

    /// Append the generated steps to `seq`.
    fn generate(&self, seq: &mut Sequence, ctx: &GeneratorContext) -> Result<(), Self::Error>;
}

/// Framing around a generated sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SequenceOptions {
    /// Idle time between the last pulse and readout, in seconds.
    pub readout_delay: f64,
    /// Pre-rotations applied before readout.
    pub state_tomography: Option<StateTomography>,
    /// Preparation pulses applied before the generated steps.
    pub process_tomography: Option<ProcessTomography>,
}

/// Build a complete sequence: preparation, generated body, tomography
/// pre-rotations, readout delay and a left-aligned readout on all qubits.
pub fn build_sequence<G: SequenceGenerator>(
    generator: &G,
    ctx: &GeneratorContext,
    options: &SequenceOptions,
) -> Result<Sequence, G::Error> {
    let mut seq = Sequence::new(ctx.n_qubit)?;
    if let Some(prep) = &options.process_tomography {
        prep.add_pulses(&mut seq)?;
    }
    generator.generate(&mut seq, ctx)?;
    if let Some(tomo) = &options.state_tomography {
        tomo.add_pulses(&mut seq)?;
    }
    if options.readout_delay > 0.0 {
        seq.add_gate_to_all(Gate::spacer(options.readout_delay), Placement::after(0.0))?;
    }
    seq.add_gate_to_all(
        Gate::readout(),
        Placement::after(0.0).with_align(Alignment::Left),
    )?;
    debug!(generator = generator.name(), steps = seq.len(), "built sequence");
    Ok(seq)
}
