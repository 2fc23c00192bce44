//! Estimator configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default error probability for confidence bounds (95% coverage).
pub const DEFAULT_ERROR_PROBABILITY: f64 = 0.05;

/// Settings shared by the streaming estimator and the bound estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Run every step through the error-mitigation collaborator.
    pub error_correction: bool,
    /// Target error probability δ for Hoeffding bounds.
    pub error_probability: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            error_correction: false,
            error_probability: DEFAULT_ERROR_PROBABILITY,
        }
    }
}

impl EstimatorConfig {
    pub fn with_error_correction(mut self, enabled: bool) -> Self {
        self.error_correction = enabled;
        self
    }

    pub fn with_error_probability(mut self, delta: f64) -> Self {
        self.error_probability = delta;
        self
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_path(path: &Path) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str::<Self>(&raw).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("failed to parse estimator config: {e}"),
            )
        })
    }
}
