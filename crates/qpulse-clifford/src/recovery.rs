//! Recovery gate search.
//!
//! Given the matrix of a randomized Clifford sequence, find the Clifford
//! that undoes it. The search walks the candidate indices in order and
//! either stops at the first accepted candidate or keeps the cheapest one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, instrument};

use crate::clifford::{
    self, GateCost, Generator, N_CLIFFORD_1Q, N_CLIFFORD_2Q, TwoQubitSequence,
};
use crate::error::{CliffordError, CliffordResult};
use crate::primitive::Primitive;
use crate::unitary::{TOLERANCE, Unitary2x2, Unitary4x4};

/// Cooperative cancellation flag shared with a running search.
///
/// Checked between candidates only.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What counts as a successful recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Criterion {
    /// The combined operator is the identity up to a global phase.
    #[default]
    Operator,
    /// The combined operator maps the ground state back to itself up to a
    /// phase.
    State,
}

/// Search settings.
#[derive(Debug, Clone, Default)]
pub struct RecoveryOptions {
    /// Keep searching for the cheapest accepted candidate.
    pub cheapest: bool,
    /// Acceptance test.
    pub criterion: Criterion,
    /// Optional cancellation flag.
    pub cancel: Option<CancelToken>,
}

impl RecoveryOptions {
    /// Set the cheapest flag.
    #[must_use]
    pub fn with_cheapest(mut self, cheapest: bool) -> Self {
        self.cheapest = cheapest;
        self
    }

    /// Set the acceptance test.
    #[must_use]
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Attach a cancellation flag.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// A recovery Clifford: its index and its gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery<S> {
    /// Index in the Clifford group.
    pub index: usize,
    /// Gates to append.
    pub sequence: S,
}

fn returns_to_ground(amplitude: num_complex::Complex64) -> bool {
    (amplitude.norm() - 1.0).abs() < TOLERANCE
}

/// Walk `0..n` and pick an accepted candidate.
///
/// `accept` returns the candidate's cost when it passes. Without
/// `cheapest` the first accepted index wins; otherwise the cheapest, with
/// ties going to the lowest index.
pub(crate) fn select(
    n: usize,
    options: &RecoveryOptions,
    mut accept: impl FnMut(usize) -> CliffordResult<Option<GateCost>>,
) -> CliffordResult<usize> {
    let mut best: Option<(usize, GateCost)> = None;
    for index in 0..n {
        if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(CliffordError::Cancelled);
        }
        let Some(cost) = accept(index)? else {
            continue;
        };
        if !options.cheapest {
            return Ok(index);
        }
        match best {
            Some((_, b)) if !cost.is_cheaper_than(&b) => {}
            _ => best = Some((index, cost)),
        }
    }
    best.map(|(index, _)| index)
        .ok_or(CliffordError::NoRecovery { candidates: n })
}

/// Find the single-qubit Clifford undoing `target`.
pub fn recover_single(
    target: &Unitary2x2,
    options: &RecoveryOptions,
) -> CliffordResult<Recovery<Vec<Primitive>>> {
    let index = select(N_CLIFFORD_1Q, options, |k| {
        let gates = clifford::single_qubit(k)?;
        let combined = clifford::evaluate_single(gates) * *target;
        let ok = match options.criterion {
            Criterion::Operator => combined.is_identity(),
            Criterion::State => returns_to_ground(combined.ground_amplitude()),
        };
        Ok(ok.then(|| clifford::single_qubit_cost(gates)))
    })?;
    debug!(index, "single-qubit recovery");
    Ok(Recovery {
        index,
        sequence: clifford::single_qubit(index)?.to_vec(),
    })
}

/// Find the two-qubit Clifford undoing `target` by exhaustive search.
#[instrument(skip_all, fields(generator = %generator, cheapest = options.cheapest))]
pub fn recover_two(
    target: &Unitary4x4,
    generator: Generator,
    options: &RecoveryOptions,
) -> CliffordResult<Recovery<TwoQubitSequence>> {
    let state = target.first_column();
    let index = select(N_CLIFFORD_2Q, options, |k| {
        let seq = clifford::two_qubit(k, generator)?;
        let candidate = seq.evaluate();
        let ok = match options.criterion {
            Criterion::Operator => (candidate * *target).is_identity(),
            Criterion::State => returns_to_ground(candidate.ground_amplitude(&state)),
        };
        Ok(ok.then(|| seq.cost()))
    })?;
    debug!(index, "two-qubit recovery");
    Ok(Recovery {
        index,
        sequence: clifford::two_qubit(index, generator)?,
    })
}
