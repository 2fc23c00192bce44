//! Streaming von Neumann entropy estimation from measured outcomes.
//!
//! Two modes:
//!
//! - **Raw**: `k` is the running proportion of entangled outcomes
//!   (`0011` / `1001`) among the first `i + 1` shots.
//! - **Mitigated**: after every shot the accumulated counts go through an
//!   [`ErrorMitigation`] collaborator, and `k` is the corrected weight of the
//!   two entangled patterns clamped to `[0, 1]`. This `k` is absolute per
//!   step rather than a running average.
//!
//! Each step emits [`von_neumann_from_k`]`(k)`, so the output has exactly one
//! estimate per input outcome, in input order.

use crate::config::EstimatorConfig;
use crate::entropy::von_neumann_from_k;
use crate::error::{EntropyError, Result};
use crate::mitigation::ErrorMitigation;
use crate::outcome::{Outcome, OutcomeCounts, OutcomeSequence};

/// Online estimator state for one run.
#[derive(Debug, Clone, Default)]
pub struct EntropyStream {
    counts: OutcomeCounts,
    hits: u64,
    shots: u64,
}

impl EntropyStream {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, outcome: Outcome) {
        self.counts.increment(outcome);
        self.shots += 1;
        if outcome.is_entangled() {
            self.hits += 1;
        }
    }

    /// Record one outcome and return the raw-mode estimate.
    pub fn push(&mut self, outcome: Outcome) -> f64 {
        self.record(outcome);
        von_neumann_from_k(self.hits as f64 / self.shots as f64)
    }

    /// Record one outcome and return the mitigated estimate.
    pub fn push_mitigated<M: ErrorMitigation + ?Sized>(
        &mut self,
        outcome: Outcome,
        mitigator: &M,
        calibration: &M::Calibration,
    ) -> Result<f64> {
        self.record(outcome);
        let corrected = mitigator.mitigate(&self.counts, calibration, self.shots)?;
        let k = corrected.entangled_weight().clamp(0.0, 1.0);
        Ok(von_neumann_from_k(k))
    }

    pub fn counts(&self) -> &OutcomeCounts {
        &self.counts
    }

    /// Number of entangled outcomes seen so far.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn shots(&self) -> u64 {
        self.shots
    }
}

/// Batch driver over a full [`OutcomeSequence`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamingEstimator {
    config: EstimatorConfig,
}

impl StreamingEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate without a mitigation collaborator.
    ///
    /// Fails with [`EntropyError::MissingCalibration`] if the configuration
    /// enables error correction.
    pub fn run(&self, outcomes: &OutcomeSequence) -> Result<Vec<f64>> {
        if self.config.error_correction {
            return Err(EntropyError::MissingCalibration {
                reason: "no mitigator was supplied",
            });
        }
        Ok(Self::run_raw(outcomes))
    }

    fn run_raw(outcomes: &OutcomeSequence) -> Vec<f64> {
        log::debug!("estimating entropy over {} outcomes (raw)", outcomes.len());
        let mut stream = EntropyStream::new();
        outcomes.iter().map(|&o| stream.push(o)).collect()
    }

    /// Estimate with an optional mitigation collaborator.
    ///
    /// With error correction disabled the mitigator and calibration are
    /// ignored. With it enabled both must be present; this is checked before
    /// the first outcome is processed.
    pub fn run_mitigated<M: ErrorMitigation + ?Sized>(
        &self,
        outcomes: &OutcomeSequence,
        mitigator: Option<&M>,
        calibration: Option<&M::Calibration>,
    ) -> Result<Vec<f64>> {
        if !self.config.error_correction {
            return Ok(Self::run_raw(outcomes));
        }
        let (mitigator, calibration) = require_collaborators(mitigator, calibration)?;

        log::debug!(
            "estimating entropy over {} outcomes (mitigated)",
            outcomes.len()
        );
        let mut stream = EntropyStream::new();
        outcomes
            .iter()
            .map(|&o| stream.push_mitigated(o, mitigator, calibration))
            .collect()
    }
}

fn require_collaborators<'a, M: ErrorMitigation + ?Sized>(
    mitigator: Option<&'a M>,
    calibration: Option<&'a M::Calibration>,
) -> Result<(&'a M, &'a M::Calibration)> {
    let mitigator = mitigator.ok_or(EntropyError::MissingCalibration {
        reason: "no mitigator was supplied",
    })?;
    let calibration = calibration.ok_or(EntropyError::MissingCalibration {
        reason: "no calibration rates were supplied",
    })?;
    Ok((mitigator, calibration))
}

/// Normalize raw symbols and estimate the entropy sequence in one call.
pub fn compute_entropy_sequence<S, M>(
    raw: &[S],
    error_correction: bool,
    mitigator: Option<&M>,
    calibration: Option<&M::Calibration>,
) -> Result<Vec<f64>>
where
    S: AsRef<str>,
    M: ErrorMitigation + ?Sized,
{
    let estimator = StreamingEstimator::new(EstimatorConfig {
        error_correction,
        ..EstimatorConfig::default()
    });
    if error_correction {
        require_collaborators(mitigator, calibration)?;
    }
    let outcomes = OutcomeSequence::parse(raw)?;
    estimator.run_mitigated(&outcomes, mitigator, calibration)
}
