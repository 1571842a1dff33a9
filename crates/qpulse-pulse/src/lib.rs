//! Pulse envelope library.
//!
//! Pure functions from a [`Pulse`] descriptor and a time axis to sampled
//! amplitudes. Nothing here knows about gates or sequences.
//!
//! # Shapes
//!
//! - [`PulseShape::Gaussian`]: area-matched Gaussian, optional plateau and
//!   start-at-zero renormalization
//! - [`PulseShape::Square`], [`PulseShape::Ramp`], [`PulseShape::Cosine`]
//! - [`PulseShape::AdiabaticFlux`]: Slepian-style controlled-phase flux pulse
//! - [`PulseShape::NetZero`]: two opposite-sign adiabatic halves
//!
//! # Example
//!
//! ```rust
//! use qpulse_pulse::{Pulse, PulseShape};
//!
//! let pulse = Pulse::new(PulseShape::Gaussian).with_amplitude(0.5).with_width(10e-9);
//! let t: Vec<f64> = (0..60).map(|i| i as f64 / 1.2e9).collect();
//! let y = pulse.waveform(25e-9, &t).unwrap();
//! assert_eq!(y.len(), t.len());
//! ```

pub mod adiabatic;
pub mod envelope;
pub mod error;
pub mod interp;
pub mod pulse;
pub mod shape;
pub mod transmon;

pub use adiabatic::AdiabaticParams;
pub use error::{PulseError, PulseResult};
pub use pulse::Pulse;
pub use shape::{PulseKind, PulseShape};
pub use transmon::Transmon;
