//! Randomized benchmarking sequence generators.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use qpulse_ir::{GeneratorContext, IrError, Sequence, SequenceGenerator};

use crate::clifford::{self, Generator, N_CLIFFORD_1Q, N_CLIFFORD_2Q, TwoQubitSequence};
use crate::error::{CliffordError, CliffordResult};
use crate::primitive::Primitive;
use crate::recovery::{RecoveryOptions, recover_single, recover_two};
use crate::table::RecoveryTable;

/// Simultaneous single-qubit randomized benchmarking.
///
/// Every qubit gets its own random Cliffords; the Cliffords of one slot are
/// padded with `I` so all qubits stay in lockstep.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleQubitRb {
    /// Number of random Cliffords.
    pub length: usize,
    /// Random seed.
    pub seed: u64,
    /// Qubits to benchmark; empty means all.
    pub qubits: Vec<usize>,
    /// Gate inserted after every Clifford.
    pub interleaved: Option<Primitive>,
    /// Pick the cheapest recovery instead of the first.
    pub cheapest: bool,
}

impl SingleQubitRb {
    /// Benchmark `length` Cliffords with `seed`.
    pub fn new(length: usize, seed: u64) -> Self {
        Self {
            length,
            seed,
            ..Self::default()
        }
    }

    fn targets(&self, n_qubit: usize) -> CliffordResult<Vec<usize>> {
        if let Some(&qubit) = self.qubits.iter().find(|&&q| q >= n_qubit) {
            return Err(IrError::QubitOutOfRange { qubit, n_qubit }.into());
        }
        Ok(if self.qubits.is_empty() {
            (0..n_qubit).collect()
        } else {
            self.qubits.clone()
        })
    }

    /// Gate lists of `n_qubit` benchmarked qubits, recovery included.
    ///
    /// All lists have the same length.
    pub fn sequence(&self, n_qubit: usize) -> CliffordResult<Vec<Vec<Primitive>>> {
        if self.interleaved.is_some_and(Primitive::is_two_qubit) {
            return Err(CliffordError::InvalidParameter {
                name: "interleaved",
                reason: "single-qubit benchmarking needs a single-qubit gate".to_string(),
            });
        }
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut lists = vec![Vec::new(); n_qubit];
        for _ in 0..self.length {
            let slot = (0..n_qubit)
                .map(|_| -> CliffordResult<Vec<Primitive>> {
                    let mut gates = clifford::single_qubit(rng.gen_range(0..N_CLIFFORD_1Q))?.to_vec();
                    gates.extend(self.interleaved);
                    Ok(gates)
                })
                .collect::<CliffordResult<Vec<_>>>()?;
            append_lockstep(&mut lists, &slot);
        }

        let options = RecoveryOptions::default().with_cheapest(self.cheapest);
        let recovery = lists
            .iter()
            .map(|gates| {
                recover_single(&clifford::evaluate_single(gates), &options).map(|r| r.sequence)
            })
            .collect::<CliffordResult<Vec<_>>>()?;
        append_lockstep(&mut lists, &recovery);
        Ok(lists)
    }
}

fn append_lockstep(lists: &mut [Vec<Primitive>], slot: &[Vec<Primitive>]) {
    let width = slot.iter().map(Vec::len).max().unwrap_or(0);
    for (list, gates) in lists.iter_mut().zip(slot) {
        list.extend(gates.iter().copied());
        list.resize(list.len() + width - gates.len(), Primitive::I);
    }
}

impl SequenceGenerator for SingleQubitRb {
    type Error = CliffordError;

    fn name(&self) -> &str {
        "rb1"
    }

    fn generate(&self, seq: &mut Sequence, ctx: &GeneratorContext) -> CliffordResult<()> {
        let qubits = self.targets(ctx.n_qubit)?;
        let lists = self.sequence(qubits.len())?;
        let steps = lists.first().map_or(0, Vec::len);
        debug!(length = self.length, steps, qubits = qubits.len(), "single-qubit RB");
        for k in 0..steps {
            let gates = lists.iter().map(|l| l[k].to_gate()).collect();
            seq.add_gate(&qubits, gates)?;
        }
        Ok(())
    }
}

/// Two-qubit randomized benchmarking on an adjacent qubit pair.
///
/// Recovery comes from `table` when one is attached, from exhaustive search
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoQubitRb {
    /// Number of random Cliffords.
    pub length: usize,
    /// Random seed.
    pub seed: u64,
    /// Lower and upper qubit; entanglers play on the lower one.
    pub qubits: [usize; 2],
    /// Entangling gate of the Clifford decomposition.
    pub generator: Generator,
    /// Gates inserted after every Clifford.
    pub interleaved: Option<TwoQubitSequence>,
    /// Pick the cheapest recovery instead of the first.
    pub cheapest: bool,
    /// Precomputed recovery table.
    #[serde(skip)]
    pub table: Option<RecoveryTable>,
}

impl Default for TwoQubitRb {
    fn default() -> Self {
        Self {
            length: 0,
            seed: 0,
            qubits: [0, 1],
            generator: Generator::Cz,
            interleaved: None,
            cheapest: false,
            table: None,
        }
    }
}

impl TwoQubitRb {
    /// Benchmark `length` Cliffords with `seed` on qubits 0 and 1.
    pub fn new(length: usize, seed: u64, generator: Generator) -> Self {
        Self {
            length,
            seed,
            generator,
            ..Self::default()
        }
    }

    /// Use `table` for the recovery.
    #[must_use]
    pub fn with_table(mut self, table: RecoveryTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Full gate list, recovery included.
    pub fn sequence(&self) -> CliffordResult<TwoQubitSequence> {
        if let Some(inter) = &self.interleaved {
            if inter.q1.len() != inter.q2.len() {
                return Err(CliffordError::InvalidParameter {
                    name: "interleaved",
                    reason: format!("{} and {} gates per qubit", inter.q1.len(), inter.q2.len()),
                });
            }
        }
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut body = TwoQubitSequence::new();
        for _ in 0..self.length {
            body.extend(&clifford::two_qubit(rng.gen_range(0..N_CLIFFORD_2Q), self.generator)?);
            if let Some(inter) = &self.interleaved {
                body.extend(inter);
            }
        }

        let applied = body.evaluate();
        let recovery = match &self.table {
            Some(table) => {
                table.check_generator(self.generator)?;
                table.lookup(&applied)?.clone()
            }
            None => {
                let options = RecoveryOptions::default().with_cheapest(self.cheapest);
                recover_two(&applied, self.generator, &options)?.sequence
            }
        };
        body.extend(&recovery);
        Ok(body)
    }
}

impl SequenceGenerator for TwoQubitRb {
    type Error = CliffordError;

    fn name(&self) -> &str {
        "rb2"
    }

    fn generate(&self, seq: &mut Sequence, ctx: &GeneratorContext) -> CliffordResult<()> {
        let [lower, upper] = self.qubits;
        if upper != lower + 1 {
            return Err(CliffordError::InvalidParameter {
                name: "qubits",
                reason: format!("expected adjacent qubits, got {lower} and {upper}"),
            });
        }
        if upper >= ctx.n_qubit {
            return Err(IrError::QubitOutOfRange {
                qubit: upper,
                n_qubit: ctx.n_qubit,
            }
            .into());
        }

        let gates = self.sequence()?;
        debug!(length = self.length, steps = gates.len(), "two-qubit RB");
        for (a, b) in gates.steps() {
            let row = match (a.is_two_qubit(), b.is_two_qubit()) {
                (true, _) => vec![a.to_gate(), Primitive::I.to_gate()],
                (_, true) => vec![b.to_gate(), Primitive::I.to_gate()],
                _ => vec![a.to_gate(), b.to_gate()],
            };
            seq.add_gate(&self.qubits, row)?;
        }
        Ok(())
    }
}
