//! Clifford group decompositions.
//!
//! Single-qubit Cliffords are 24 fixed gate lists. Two-qubit Cliffords are
//! indexed in `0..11520` and split into four classes, each with its own
//! construction from single-qubit Cliffords, the S1 coset representatives
//! and one to three entanglers:
//!
//! | range            | class        | size          |
//! |------------------|--------------|---------------|
//! | `0..576`         | single-qubit | 24 × 24       |
//! | `576..5760`      | CNOT-like    | 24² × 3²      |
//! | `5760..10944`    | iSWAP-like   | 24² × 3²      |
//! | `10944..11520`   | SWAP-like    | 24 × 24       |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CliffordError, CliffordResult};
use crate::primitive::Primitive::{self, I, X2m, X2p, Xp, Y2m, Y2p, Yp};
use crate::unitary::{Unitary2x2, Unitary4x4};

/// Size of the single-qubit Clifford group.
pub const N_CLIFFORD_1Q: usize = 24;

/// Size of the two-qubit Clifford group (up to phase).
pub const N_CLIFFORD_2Q: usize = 11520;

const CNOT_LIKE: usize = 576;
const ISWAP_LIKE: usize = 5760;
const SWAP_LIKE: usize = 10944;

const C1: [&[Primitive]; N_CLIFFORD_1Q] = [
    // Paulis
    &[I],
    &[Xp],
    &[Yp],
    &[Yp, Xp],
    // 2π/3 rotations
    &[X2p, Y2p],
    &[X2p, Y2m],
    &[X2m, Y2p],
    &[X2m, Y2m],
    &[Y2p, X2p],
    &[Y2p, X2m],
    &[Y2m, X2p],
    &[Y2m, X2m],
    // π/2 rotations
    &[X2p],
    &[X2m],
    &[Y2p],
    &[Y2m],
    &[X2m, Y2p, X2p],
    &[X2m, Y2m, X2p],
    // Hadamard-like
    &[Xp, Y2p],
    &[Xp, Y2m],
    &[Yp, X2p],
    &[Yp, X2m],
    &[X2p, Y2p, X2p],
    &[X2m, Y2p, X2m],
];

const S1: [&[Primitive]; 3] = [&[I], &[Y2p, X2p], &[X2m, Y2m]];
const S1_X2P: [&[Primitive]; 3] = [&[X2p], &[X2p, Y2p, X2p], &[Y2m]];
const S1_Y2P: [&[Primitive]; 3] = [&[Y2p], &[Yp, X2p], &[X2m, Y2m, X2p]];

/// Native entangling gate of a two-qubit Clifford set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generator {
    /// Controlled phase.
    #[default]
    Cz,
    /// iSWAP.
    Iswap,
}

impl Generator {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Generator::Cz => "cz",
            Generator::Iswap => "iswap",
        }
    }

    fn entangler(self) -> Primitive {
        match self {
            Generator::Cz => Primitive::Cz,
            Generator::Iswap => Primitive::ISwap,
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Generator {
    type Err = CliffordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cz" | "cph" => Ok(Generator::Cz),
            "iswap" => Ok(Generator::Iswap),
            _ => Err(CliffordError::UnknownGenerator(s.to_string())),
        }
    }
}

/// Gate count summary used to rank recovery candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GateCost {
    /// Entangling gates.
    pub two_qubit: usize,
    /// Non-identity single-qubit gates.
    pub single_qubit: usize,
    /// Identity gates.
    pub identity: usize,
}

impl GateCost {
    fn count(gates: impl IntoIterator<Item = Primitive>) -> Self {
        let mut cost = Self::default();
        for g in gates {
            if g.is_two_qubit() {
                cost.two_qubit += 1;
            } else if g.is_identity() {
                cost.identity += 1;
            } else {
                cost.single_qubit += 1;
            }
        }
        cost
    }

    /// Whether `self` is strictly cheaper: fewer entanglers, then fewer
    /// single-qubit gates, then more identities.
    pub fn is_cheaper_than(&self, other: &Self) -> bool {
        (self.two_qubit, self.single_qubit, std::cmp::Reverse(self.identity))
            < (other.two_qubit, other.single_qubit, std::cmp::Reverse(other.identity))
    }
}

/// Gates of one single-qubit Clifford.
pub fn single_qubit(index: usize) -> CliffordResult<&'static [Primitive]> {
    C1.get(index).copied().ok_or(CliffordError::IndexOutOfRange {
        index,
        size: N_CLIFFORD_1Q,
    })
}

/// Matrix of a single-qubit gate list applied in order.
pub fn evaluate_single(gates: &[Primitive]) -> Unitary2x2 {
    gates
        .iter()
        .fold(Unitary2x2::identity(), |m, g| g.unitary() * m)
}

/// Cost of a single-qubit gate list.
pub fn single_qubit_cost(gates: &[Primitive]) -> GateCost {
    GateCost::count(gates.iter().copied())
}

/// A two-qubit gate list: one gate per qubit and step.
///
/// An entangler in either slot acts on both qubits; the other slot of that
/// step holds `I`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TwoQubitSequence {
    /// Gates of the first (lower) qubit.
    pub q1: Vec<Primitive>,
    /// Gates of the second qubit.
    pub q2: Vec<Primitive>,
}

impl TwoQubitSequence {
    /// Empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.q1.len()
    }

    /// Whether there are no steps.
    pub fn is_empty(&self) -> bool {
        self.q1.is_empty()
    }

    /// Steps as gate pairs.
    pub fn steps(&self) -> impl Iterator<Item = (Primitive, Primitive)> + '_ {
        self.q1.iter().copied().zip(self.q2.iter().copied())
    }

    /// Append one step.
    pub fn push(&mut self, g1: Primitive, g2: Primitive) {
        self.q1.push(g1);
        self.q2.push(g2);
    }

    /// Append two single-qubit lists side by side, padding the shorter with `I`.
    pub fn push_parallel(&mut self, a: &[Primitive], b: &[Primitive]) {
        let n = a.len().max(b.len());
        for k in 0..n {
            self.push(
                a.get(k).copied().unwrap_or(I),
                b.get(k).copied().unwrap_or(I),
            );
        }
    }

    /// Append another sequence.
    pub fn extend(&mut self, other: &TwoQubitSequence) {
        self.q1.extend_from_slice(&other.q1);
        self.q2.extend_from_slice(&other.q2);
    }

    /// Matrix of the sequence applied in order.
    pub fn evaluate(&self) -> Unitary4x4 {
        self.steps().fold(Unitary4x4::identity(), |m, (a, b)| {
            let step = a
                .entangler()
                .or_else(|| b.entangler())
                .unwrap_or_else(|| Unitary4x4::kron(&a.unitary(), &b.unitary()));
            step * m
        })
    }

    /// Gate counts over both qubits.
    pub fn cost(&self) -> GateCost {
        GateCost::count(self.q1.iter().chain(&self.q2).copied())
    }
}

/// Gates of one two-qubit Clifford.
pub fn two_qubit(index: usize, generator: Generator) -> CliffordResult<TwoQubitSequence> {
    if index >= N_CLIFFORD_2Q {
        return Err(CliffordError::IndexOutOfRange {
            index,
            size: N_CLIFFORD_2Q,
        });
    }
    let e = generator.entangler();
    let mut seq = TwoQubitSequence::new();

    if index < CNOT_LIKE {
        seq.push_parallel(C1[index % 24], C1[(index / 24) % 24]);
        return Ok(seq);
    }
    if index >= SWAP_LIKE {
        let i = index - SWAP_LIKE;
        match generator {
            Generator::Cz => {
                seq.q1.extend_from_slice(&[I, I, Y2p, I, Y2m, I]);
                seq.q2.extend_from_slice(&[Y2p, e, Y2m, e, Y2p, e]);
            }
            Generator::Iswap => {
                seq.push(I, e);
                seq.push(I, X2p);
                seq.push(I, e);
                seq.push_parallel(&[Y2p, X2m], &[X2m, Y2p, X2p]);
                seq.push(I, e);
            }
        }
        seq.push_parallel(C1[i % 24], C1[(i / 24) % 24]);
        return Ok(seq);
    }

    let i = if index < ISWAP_LIKE {
        index - CNOT_LIKE
    } else {
        index - ISWAP_LIKE
    };
    let (i1, i2, i3, i4) = (i % 3, (i / 3) % 3, (i / 9) % 24, (i / 216) % 24);
    match (index < ISWAP_LIKE, generator) {
        (true, Generator::Cz) => {
            seq.push_parallel(S1[i1], S1_Y2P[i2]);
            seq.push(I, e);
        }
        (true, Generator::Iswap) => {
            seq.push_parallel(S1[i1], S1_Y2P[i2]);
            seq.push(I, e);
            seq.push(I, X2p);
            seq.push(I, e);
        }
        (false, Generator::Cz) => {
            seq.push_parallel(S1_Y2P[i1], S1_X2P[i2]);
            seq.push(I, e);
            seq.push(Y2p, X2m);
            seq.push(I, e);
        }
        (false, Generator::Iswap) => {
            seq.push_parallel(S1[i1], S1[i2]);
            seq.push(I, e);
        }
    }
    seq.push_parallel(C1[i3], C1[i4]);
    Ok(seq)
}
