//! Library side of the `qpulse` binary: run files and command bodies.

pub mod commands;
pub mod config;

pub use config::{RunConfig, SequenceSpec};
