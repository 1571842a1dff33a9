//! Gates, steps and sequences.
//!
//! A [`Sequence`] is an ordered list of [`Step`]s over a fixed number of
//! qubits, each step holding at most one [`Gate`] per qubit. Sequences are
//! built with the `add_*` methods, either by hand or through a
//! [`SequenceGenerator`], and are consumed by the compiler.
//!
//! # Example
//!
//! ```rust
//! use qpulse_ir::{from_name, CompositeGate, Sequence};
//!
//! let mut seq = Sequence::new(2).unwrap();
//! seq.add_single(0, from_name("X2p").unwrap()).unwrap();
//! seq.add_gate(&[0, 1], vec![CompositeGate::cnot().into()]).unwrap();
//! assert_eq!(seq.len(), 4);
//! ```

pub mod builtin;
pub mod catalog;
pub mod composite;
pub mod error;
pub mod gate;
pub mod generator;
pub mod sequence;
pub mod step;
pub mod tomography;

pub use builtin::{Cpmg, PulseTrain, Rabi, SpinLocking, SpinLockingMode};
pub use catalog::{from_name, name_of, reversed_name, GATE_NAMES};
pub use composite::CompositeGate;
pub use error::{IrError, IrResult};
pub use gate::{Axis, Gate, PulseSlot, TwoQubitKind};
pub use generator::{build_sequence, GeneratorContext, SequenceGenerator, SequenceOptions};
pub use sequence::{Sequence, MAX_QUBIT};
pub use step::{Alignment, Placement, Step};
pub use tomography::{PauliBasis, PrepState, ProcessTomography, StateTomography};
