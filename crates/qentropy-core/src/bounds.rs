//! Hoeffding confidence sequences for the entangled-outcome proportion.
//!
//! At step `n` (1-based) the running proportion `p̂ₙ = k/n` lies within
//! `wₙ = √(ln(2/δ) / 2n)` of the true proportion with probability at least
//! `1 − δ`. The bounds are not clipped to `[0, 1]`.

use serde::Serialize;

use crate::entropy::von_neumann_from_k;
use crate::error::{EntropyError, Result};
use crate::outcome::OutcomeSequence;

/// Upper and lower bound sequences, one entry per outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceBounds {
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    /// Running proportion the bounds are centred on.
    pub proportion: Vec<f64>,
}

impl ConfidenceBounds {
    pub fn len(&self) -> usize {
        self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upper.is_empty()
    }

    /// `upper[i] - lower[i]` for every step.
    pub fn widths(&self) -> Vec<f64> {
        self.upper
            .iter()
            .zip(&self.lower)
            .map(|(u, l)| u - l)
            .collect()
    }

    /// Entropy interval per step, obtained by pushing each proportion bound
    /// through [`von_neumann_from_k`]. Returned as `(lower, upper)` pairs.
    pub fn entropy_bounds(&self) -> Vec<(f64, f64)> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&l, &u)| (von_neumann_from_k(l), von_neumann_from_k(u)))
            .collect()
    }
}

/// Hoeffding half-width after `n` samples at error probability `delta`.
pub fn hoeffding_half_width(n: usize, delta: f64) -> f64 {
    ((2.0 / delta).ln() / (2.0 * n as f64)).sqrt()
}

/// Running confidence bounds on the entangled proportion.
pub fn confidence_bounds(
    outcomes: &OutcomeSequence,
    error_probability: f64,
) -> Result<ConfidenceBounds> {
    if !(error_probability > 0.0 && error_probability < 1.0) {
        return Err(EntropyError::InvalidErrorProbability(error_probability));
    }
    log::debug!(
        "confidence bounds over {} outcomes at delta = {error_probability}",
        outcomes.len()
    );

    let n_total = outcomes.len();
    let mut upper = Vec::with_capacity(n_total);
    let mut lower = Vec::with_capacity(n_total);
    let mut proportion = Vec::with_capacity(n_total);

    let mut k = 0usize;
    for (i, outcome) in outcomes.iter().enumerate() {
        if outcome.is_entangled() {
            k += 1;
        }
        let n = i + 1;
        let p = k as f64 / n as f64;
        let w = hoeffding_half_width(n, error_probability);
        upper.push(p + w);
        lower.push(p - w);
        proportion.push(p);
    }

    Ok(ConfidenceBounds {
        upper,
        lower,
        proportion,
    })
}
