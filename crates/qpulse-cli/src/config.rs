//! Run files.
//!
//! A run file is YAML with the compiler settings, the experiment to
//! generate and its framing:
//!
//! ```yaml
//! compiler:
//!   n_qubit: 2
//!   sample_rate: 2.4e9
//! sequence:
//!   type: rb2
//!   length: 20
//!   seed: 7
//!   cheapest: true
//! recovery_table: cz.json
//! readout_delay: 20e-9
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use qpulse_clifford::{RecoveryTable, SingleQubitRb, TwoQubitRb};
use qpulse_compile::CompilerConfig;
use qpulse_ir::{
    build_sequence, Cpmg, GeneratorContext, ProcessTomography, PulseTrain, Rabi, Sequence,
    SequenceOptions, SpinLocking, StateTomography,
};

/// Experiment to generate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SequenceSpec {
    /// π pulse on every qubit
    #[default]
    Rabi,
    /// Echo train
    Cpmg(Cpmg),
    /// Repeated gate
    PulseTrain(PulseTrain),
    /// Spin-locking drive
    SpinLocking(SpinLocking),
    /// Single-qubit randomized benchmarking
    Rb1(SingleQubitRb),
    /// Two-qubit randomized benchmarking
    Rb2(TwoQubitRb),
}

/// Contents of a run file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Compiler settings
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Experiment
    #[serde(default)]
    pub sequence: SequenceSpec,

    /// Idle time before readout, in seconds
    #[serde(default)]
    pub readout_delay: f64,

    /// Pre-rotations before readout
    #[serde(default)]
    pub state_tomography: Option<StateTomography>,

    /// Preparation pulses before the experiment
    #[serde(default)]
    pub process_tomography: Option<ProcessTomography>,

    /// Recovery table for two-qubit benchmarking, relative to the run file
    #[serde(default)]
    pub recovery_table: Option<PathBuf>,
}

impl RunConfig {
    /// Load a run file, apply environment overrides and validate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read run file: {}", path.display()))?;
        let mut config: RunConfig = serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse run file: {}", path.display()))?;

        if let (Some(table), Some(dir)) = (&config.recovery_table, path.parent()) {
            config.recovery_table = Some(dir.join(table));
        }
        config.apply_env_overrides();
        config.compiler = config.compiler.with_default_pulses();
        config.compiler.validate()?;
        debug!(n_qubit = config.compiler.n_qubit, "run file loaded");
        Ok(config)
    }

    /// Apply `QPULSE_SAMPLE_RATE` and `QPULSE_N_QUBIT`.
    ///
    /// Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(rate) = std::env::var("QPULSE_SAMPLE_RATE") {
            if let Ok(val) = rate.parse() {
                self.compiler.sample_rate = val;
            }
        }
        if let Ok(n) = std::env::var("QPULSE_N_QUBIT") {
            if let Ok(val) = n.parse() {
                self.compiler.n_qubit = val;
            }
        }
    }

    /// Generate the framed sequence.
    pub fn build(&self) -> Result<Sequence> {
        let ctx = GeneratorContext::new(self.compiler.xy.clone());
        let options = SequenceOptions {
            readout_delay: self.readout_delay,
            state_tomography: self.state_tomography.clone(),
            process_tomography: self.process_tomography.clone(),
        };
        let seq = match &self.sequence {
            SequenceSpec::Rabi => build_sequence(&Rabi, &ctx, &options)?,
            SequenceSpec::Cpmg(g) => build_sequence(g, &ctx, &options)?,
            SequenceSpec::PulseTrain(g) => build_sequence(g, &ctx, &options)?,
            SequenceSpec::SpinLocking(g) => build_sequence(g, &ctx, &options)?,
            SequenceSpec::Rb1(g) => build_sequence(g, &ctx, &options)?,
            SequenceSpec::Rb2(g) => match &self.recovery_table {
                Some(path) => {
                    let table = RecoveryTable::load(path).with_context(|| {
                        format!("Failed to load recovery table: {}", path.display())
                    })?;
                    info!(entries = table.len(), "using recovery table");
                    build_sequence(&g.clone().with_table(table), &ctx, &options)?
                }
                None => build_sequence(g, &ctx, &options)?,
            },
        };
        Ok(seq)
    }
}
