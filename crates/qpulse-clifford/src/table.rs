//! Precomputed two-qubit recovery table.
//!
//! The state a Clifford sequence leaves behind from |00⟩ is one of 60
//! stabilizer states. The table maps each state's stabilizer fingerprint to
//! the cheapest Clifford returning it to |00⟩, so that randomized
//! benchmarking can skip the exhaustive search.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::clifford::{self, GateCost, Generator, N_CLIFFORD_2Q, TwoQubitSequence};
use crate::error::{CliffordError, CliffordResult};
use crate::recovery::{self, CancelToken, Criterion, RecoveryOptions};
use crate::stabilizer;
use crate::unitary::{TOLERANCE, Unitary4x4};

/// Format version written by this build.
pub const TABLE_VERSION: u32 = 1;

/// Stabilizer fingerprint → recovery sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryTable {
    version: u32,
    generator: Generator,
    entries: BTreeMap<String, TwoQubitSequence>,
}

struct Candidate {
    sequence: TwoQubitSequence,
    unitary: Unitary4x4,
    cost: GateCost,
}

impl RecoveryTable {
    /// Build the table for `generator`.
    ///
    /// `progress` is called with `(done, total)` after each stabilizer state
    /// is solved, possibly from several threads.
    #[instrument(skip_all, fields(generator = %generator))]
    pub fn build(
        generator: Generator,
        cancel: Option<&CancelToken>,
        progress: impl Fn(usize, usize) + Sync,
    ) -> CliffordResult<Self> {
        let candidates = (0..N_CLIFFORD_2Q)
            .into_par_iter()
            .map(|k| -> CliffordResult<Candidate> {
                let sequence = clifford::two_qubit(k, generator)?;
                Ok(Candidate {
                    unitary: sequence.evaluate(),
                    cost: sequence.cost(),
                    sequence,
                })
            })
            .collect::<CliffordResult<Vec<_>>>()?;

        let keys: Vec<String> = candidates
            .par_iter()
            .map(|c| stabilizer::key(&c.unitary.first_column()))
            .collect();
        let mut first: FxHashMap<&str, usize> = FxHashMap::default();
        let mut states: Vec<(&str, usize)> = Vec::new();
        for (k, key) in keys.iter().enumerate() {
            first.entry(key.as_str()).or_insert_with(|| {
                states.push((key.as_str(), k));
                k
            });
        }
        let total = states.len();
        debug!(states = total, "distinct stabilizer states");

        let mut options = RecoveryOptions::default()
            .with_cheapest(true)
            .with_criterion(Criterion::State);
        if let Some(cancel) = cancel {
            options = options.with_cancel(cancel.clone());
        }
        let done = AtomicUsize::new(0);
        let entries = states
            .par_iter()
            .map(|&(key, representative)| -> CliffordResult<(String, TwoQubitSequence)> {
                let state = candidates[representative].unitary.first_column();
                let index = recovery::select(candidates.len(), &options, |j| {
                    let c = &candidates[j];
                    let ok = (c.unitary.ground_amplitude(&state).norm() - 1.0).abs() < TOLERANCE;
                    Ok(ok.then_some(c.cost))
                })?;
                progress(done.fetch_add(1, Ordering::Relaxed) + 1, total);
                Ok((key.to_string(), candidates[index].sequence.clone()))
            })
            .collect::<CliffordResult<BTreeMap<_, _>>>()?;

        info!(entries = entries.len(), "recovery table built");
        Ok(Self {
            version: TABLE_VERSION,
            generator,
            entries,
        })
    }

    /// Entangling gate the table was built for.
    pub fn generator(&self) -> Generator {
        self.generator
    }

    /// Number of stabilizer states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by fingerprint.
    pub fn entries(&self) -> &BTreeMap<String, TwoQubitSequence> {
        &self.entries
    }

    /// Fail unless the table was built for `generator`.
    pub fn check_generator(&self, generator: Generator) -> CliffordResult<()> {
        if self.generator != generator {
            return Err(CliffordError::GeneratorMismatch {
                table: self.generator.to_string(),
                requested: generator.to_string(),
            });
        }
        Ok(())
    }

    /// Recovery for the state `sequence` prepares from |00⟩.
    pub fn lookup(&self, sequence: &Unitary4x4) -> CliffordResult<&TwoQubitSequence> {
        let key = stabilizer::key(&sequence.first_column());
        self.entries
            .get(&key)
            .ok_or(CliffordError::MissingEntry(key))
    }

    /// Write as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> CliffordResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Read a table written by [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> CliffordResult<Self> {
        let file = File::open(path)?;
        let table: Self = serde_json::from_reader(BufReader::new(file))?;
        if table.version != TABLE_VERSION {
            return Err(CliffordError::TableVersion {
                found: table.version,
                expected: TABLE_VERSION,
            });
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_mismatch() {
        let table = RecoveryTable {
            version: TABLE_VERSION,
            generator: Generator::Cz,
            entries: BTreeMap::new(),
        };
        assert!(table.check_generator(Generator::Cz).is_ok());
        let err = table.check_generator(Generator::Iswap).unwrap_err();
        assert!(matches!(err, CliffordError::GeneratorMismatch { .. }));
        let err = table.lookup(&Unitary4x4::identity()).unwrap_err();
        assert!(matches!(err, CliffordError::MissingEntry(_)));
    }

    #[test]
    fn test_version_checked_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(&path, r#"{"version":0,"generator":"cz","entries":{}}"#).unwrap();
        let err = RecoveryTable::load(&path).unwrap_err();
        assert!(matches!(err, CliffordError::TableVersion { found: 0, expected: 1 }));
    }

    #[test]
    fn test_cancelled_build() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = RecoveryTable::build(Generator::Cz, Some(&cancel), |_, _| {}).unwrap_err();
        assert!(matches!(err, CliffordError::Cancelled));
    }
}
