//! # qentropy-core
//!
//! **Entanglement entropy from measurement statistics.**
//!
//! `qentropy-core` turns a stream of 4-bit measurement outcomes into a running
//! von Neumann entropy estimate, brackets the underlying proportion with
//! Hoeffding confidence bounds, and computes exact entropies from state
//! vectors or density matrices for comparison.
//!
//! ## Quick Start
//!
//! ```
//! use qentropy_core::{OutcomeSequence, StreamingEstimator, confidence_bounds};
//!
//! let outcomes = OutcomeSequence::parse(&["0000", "0 0 1 1", "0011", "1001"]).unwrap();
//!
//! let entropy = StreamingEstimator::default().run(&outcomes).unwrap();
//! assert_eq!(entropy, vec![0.0, 1.0, 1.0, 1.0]);
//!
//! let bounds = confidence_bounds(&outcomes, 0.05).unwrap();
//! assert_eq!(bounds.len(), 4);
//! ```
//!
//! ## Architecture
//!
//! Raw symbols → [`OutcomeSequence`] (normalize once) → estimator → output
//!
//! - [`StreamingEstimator`]: per-shot entropy from the running proportion of
//!   entangled outcomes, or from mitigated counts via [`ErrorMitigation`].
//! - [`confidence_bounds`]: Hoeffding interval on the same proportion.
//! - [`density`]: partial traces, Kronecker products, and spectral entropy
//!   for ground truth.

pub mod bounds;
pub mod config;
pub mod density;
pub mod entropy;
pub mod error;
pub mod estimator;
pub mod mitigation;
pub mod outcome;
pub mod random;
pub mod registers;

pub use bounds::{ConfidenceBounds, confidence_bounds, hoeffding_half_width};
pub use config::{DEFAULT_ERROR_PROBABILITY, EstimatorConfig};
pub use density::{
    StateInput, density_matrix, eigenvalues, partial_traces, reduced_entropies, tensor,
    tensor_product, von_neumann_entropy, von_neumann_entropy_from_state,
};
pub use entropy::{binary_entropy, von_neumann_from_k};
pub use error::{EntropyError, Result};
pub use estimator::{EntropyStream, StreamingEstimator, compute_entropy_sequence};
pub use mitigation::{
    CorrectedCounts, ErrorMitigation, ReadoutCalibration, ReadoutMitigator,
    load_calibration_from_path,
};
pub use outcome::{Outcome, OutcomeCounts, OutcomeSequence, PATTERN_COUNT};
pub use random::{STATE_WIDTH, random_state, random_states};
pub use registers::{RegisterMemory, combine_registers};

/// Re-exported so callers can build states without naming the crates.
pub use nalgebra::{DMatrix, DVector};
pub use num_complex::Complex64;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
