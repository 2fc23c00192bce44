//! Error types shared by every estimator and linear-algebra routine.

use thiserror::Error;

/// Errors surfaced by `qentropy-core`.
///
/// All of these are deterministic input problems: nothing is retried and no
/// partial result is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntropyError {
    /// A measurement symbol did not normalize to four `0`/`1` characters.
    #[error("invalid outcome at index {index}: {raw:?} is not a 4-bit pattern")]
    InvalidOutcomeFormat { index: usize, raw: String },

    /// Error correction was requested without what it needs to run.
    #[error("error correction requested but {reason}")]
    MissingCalibration { reason: &'static str },

    /// A vector or matrix did not have the size implied by the subsystem dimensions.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Error probability for a confidence bound must lie in (0, 1).
    #[error("error probability must be in (0, 1), got {0}")]
    InvalidErrorProbability(f64),

    /// The error-mitigation collaborator rejected its input.
    #[error("error mitigation failed: {0}")]
    Mitigation(String),

    /// Registers of one measurement record disagree on the number of shots.
    #[error("register {register:?} has {actual} shots, expected {expected}")]
    RegisterLengthMismatch {
        register: String,
        expected: usize,
        actual: usize,
    },

    /// A reduced density matrix had zero trace and cannot be normalized.
    #[error("state has zero norm; reduced density matrix cannot be normalized")]
    DegenerateState,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EntropyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_outcome_message_names_index_and_value() {
        let err = EntropyError::InvalidOutcomeFormat {
            index: 7,
            raw: "01x1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("index 7"));
        assert!(msg.contains("01x1"));
    }

    #[test]
    fn dimension_mismatch_reports_expected_and_actual() {
        let err = EntropyError::DimensionMismatch {
            context: "partial trace",
            expected: 6,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch in partial trace: expected 6, got 4"
        );
    }
}
