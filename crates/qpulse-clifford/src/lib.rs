//! Clifford group algebra and randomized benchmarking.
//!
//! - [`clifford`]: decompositions of the 24 single-qubit and 11520
//!   two-qubit Cliffords into native gates, and their matrices.
//! - [`recovery`]: exhaustive search for the Clifford undoing a sequence.
//! - [`RecoveryTable`]: stabilizer-keyed recovery lookup, built once in
//!   parallel and persisted as JSON.
//! - [`SingleQubitRb`] / [`TwoQubitRb`]: sequence generators for
//!   randomized benchmarking.
//!
//! # Example
//!
//! ```rust
//! use qpulse_clifford::{clifford, recover_single, RecoveryOptions};
//!
//! let gates = clifford::single_qubit(5).unwrap();
//! let target = clifford::evaluate_single(gates);
//! let rec = recover_single(&target, &RecoveryOptions::default()).unwrap();
//! assert!((clifford::evaluate_single(&rec.sequence) * target).is_identity());
//! ```

pub mod clifford;
pub mod error;
pub mod primitive;
pub mod rb;
pub mod recovery;
pub mod stabilizer;
pub mod table;
pub mod unitary;

pub use clifford::{GateCost, Generator, TwoQubitSequence, N_CLIFFORD_1Q, N_CLIFFORD_2Q};
pub use error::{CliffordError, CliffordResult};
pub use primitive::Primitive;
pub use rb::{SingleQubitRb, TwoQubitRb};
pub use recovery::{
    recover_single, recover_two, CancelToken, Criterion, Recovery, RecoveryOptions,
};
pub use table::{RecoveryTable, TABLE_VERSION};
pub use unitary::{Unitary2x2, Unitary4x4};
