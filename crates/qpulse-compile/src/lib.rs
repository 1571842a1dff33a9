//! Pulse sequence compiler.
//!
//! Turns a [`Sequence`](qpulse_ir::Sequence) into sampled waveforms in two
//! stages:
//!
//! 1. **Schedule**: fill empty slots, split steps if pulses may not overlap,
//!    resolve step timing and alignment, sort chronologically and propagate
//!    virtual-Z phases ([`Schedule`]).
//! 2. **Render**: allocate per-qubit buffers, sample each gate into its
//!    index window and post-process: shared drive line, crosstalk, readout
//!    trigger, gate switch and readout offsets ([`Waveforms`]).
//!
//! # Example
//!
//! ```rust
//! use qpulse_compile::{Compiler, CompilerConfig};
//! use qpulse_ir::{from_name, Sequence};
//!
//! let compiler = Compiler::new(CompilerConfig::new(1)).unwrap();
//! let mut seq = Sequence::new(1).unwrap();
//! seq.add_single(0, from_name("X2p").unwrap()).unwrap();
//! let waveforms = compiler.compile(&seq).unwrap();
//! assert_eq!(waveforms.xy.len(), 1);
//! ```

pub mod config;
pub mod crosstalk;
pub mod error;
pub mod gate_switch;
pub mod readout;
pub mod render;
pub mod schedule;
pub mod waveforms;

pub use config::{CompilerConfig, GateSwitchConfig, ReadoutConfig, ReadoutTrigger};
pub use error::{CompileError, CompileResult};
pub use render::Compiler;
pub use schedule::{Schedule, ScheduledStep};
pub use waveforms::Waveforms;
