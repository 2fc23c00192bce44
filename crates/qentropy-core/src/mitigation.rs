//! Measurement error mitigation.
//!
//! The streaming estimator only depends on the [`ErrorMitigation`] contract:
//! given the running outcome counts, a calibration, and the shot count, return
//! corrected values keyed by the same 16 patterns. How the calibration was
//! obtained is the caller's business.
//!
//! [`ReadoutMitigator`] is a ready-made implementation for independent
//! per-bit readout errors. Each bit `q` is modelled by the assignment matrix
//!
//! ```text
//!        prepared 0   prepared 1
//! read 0 [ 1 - p01      p10     ]
//! read 1 [   p01      1 - p10   ]
//! ```
//!
//! and the measured distribution is corrected by applying the inverse of each
//! 2×2 matrix along its bit axis. The result is a quasi-probability vector:
//! entries can be slightly negative and are not renormalized.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EntropyError, Result};
use crate::outcome::{OUTCOME_BITS, Outcome, OutcomeCounts, PATTERN_COUNT};

/// Below this determinant a per-bit assignment matrix is treated as singular.
const SINGULAR_EPS: f64 = 1e-9;

/// Corrected per-pattern values returned by a mitigator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrectedCounts {
    values: [f64; PATTERN_COUNT],
}

impl CorrectedCounts {
    pub fn new(values: [f64; PATTERN_COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, outcome: Outcome) -> f64 {
        self.values[outcome.index()]
    }

    pub fn as_array(&self) -> &[f64; PATTERN_COUNT] {
        &self.values
    }

    /// Combined weight of the entangled signatures `0011` and `1001`.
    pub fn entangled_weight(&self) -> f64 {
        self.get(Outcome::ENTANGLED_LOW) + self.get(Outcome::ENTANGLED_HIGH)
    }
}

/// Error-mitigation collaborator used by the streaming estimator.
pub trait ErrorMitigation {
    /// Calibration data this mitigator consumes. Opaque to the estimator.
    type Calibration;

    /// Correct `counts` (accumulated over `shots` shots).
    fn mitigate(
        &self,
        counts: &OutcomeCounts,
        calibration: &Self::Calibration,
        shots: u64,
    ) -> Result<CorrectedCounts>;
}

/// Per-bit readout flip probabilities. Index 0 is the leftmost character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadoutCalibration {
    /// P(read 1 | prepared 0) for each bit.
    pub p01: [f64; OUTCOME_BITS],
    /// P(read 0 | prepared 1) for each bit.
    pub p10: [f64; OUTCOME_BITS],
}

impl ReadoutCalibration {
    /// Same flip rates on every bit.
    pub fn uniform(p01: f64, p10: f64) -> Self {
        Self {
            p01: [p01; OUTCOME_BITS],
            p10: [p10; OUTCOME_BITS],
        }
    }

    /// Perfect readout.
    pub fn ideal() -> Self {
        Self::uniform(0.0, 0.0)
    }

    fn validate(&self) -> Result<()> {
        for (q, (&a, &b)) in self.p01.iter().zip(self.p10.iter()).enumerate() {
            if !(0.0..=1.0).contains(&a) || !(0.0..=1.0).contains(&b) {
                return Err(EntropyError::Mitigation(format!(
                    "bit {q}: flip probabilities ({a}, {b}) outside [0, 1]"
                )));
            }
            if (1.0 - a - b).abs() < SINGULAR_EPS {
                return Err(EntropyError::Mitigation(format!(
                    "bit {q}: assignment matrix is singular (p01 + p10 = 1)"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ReadoutCalibration {
    fn default() -> Self {
        Self::ideal()
    }
}

/// Tensored readout-error inversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadoutMitigator;

impl ReadoutMitigator {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorMitigation for ReadoutMitigator {
    type Calibration = ReadoutCalibration;

    fn mitigate(
        &self,
        counts: &OutcomeCounts,
        calibration: &ReadoutCalibration,
        shots: u64,
    ) -> Result<CorrectedCounts> {
        if shots == 0 {
            return Err(EntropyError::Mitigation("shot count is zero".into()));
        }
        calibration.validate()?;

        let mut values = [0.0; PATTERN_COUNT];
        for (v, &c) in values.iter_mut().zip(counts.as_array().iter()) {
            *v = c as f64 / shots as f64;
        }

        for q in 0..OUTCOME_BITS {
            let (a, b) = (calibration.p01[q], calibration.p10[q]);
            let det = 1.0 - a - b;
            // inverse of [[1-a, b], [a, 1-b]]
            let inv = [
                [(1.0 - b) / det, -b / det],
                [-a / det, (1.0 - a) / det],
            ];
            let mask = 1usize << (OUTCOME_BITS - 1 - q);
            for idx in (0..PATTERN_COUNT).filter(|i| i & mask == 0) {
                let (v0, v1) = (values[idx], values[idx | mask]);
                values[idx] = inv[0][0] * v0 + inv[0][1] * v1;
                values[idx | mask] = inv[1][0] * v0 + inv[1][1] * v1;
            }
        }

        Ok(CorrectedCounts::new(values))
    }
}

/// Load a readout calibration from a JSON file.
pub fn load_calibration_from_path(path: &Path) -> std::io::Result<ReadoutCalibration> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str::<ReadoutCalibration>(&raw).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("failed to parse calibration JSON: {e}"),
        )
    })
}
