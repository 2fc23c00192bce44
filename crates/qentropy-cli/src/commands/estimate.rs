//! `qentropy estimate` — streaming entropy estimate per shot.

use std::path::Path;

use qentropy_core::{
    OutcomeSequence, ReadoutMitigator, StreamingEstimator, load_calibration_from_path,
};
use serde::Serialize;

/// Inputs for the estimate command.
pub struct EstimateCommandConfig<'a> {
    pub input: &'a str,
    pub registers: bool,
    pub error_correction: bool,
    pub calibration_path: Option<&'a str>,
    pub config_path: Option<&'a str>,
    pub output_path: Option<&'a str>,
}

#[derive(Serialize)]
struct EstimateReport<'a> {
    shots: usize,
    error_correction: bool,
    entangled_shots: usize,
    final_entropy: Option<f64>,
    entropy: &'a [f64],
}

/// Number of rows printed before eliding the middle of the sequence.
const PREVIEW_ROWS: usize = 10;

pub fn run(cfg: EstimateCommandConfig<'_>) {
    let mut config = super::load_config(cfg.config_path);
    if cfg.error_correction {
        config.error_correction = true;
    }

    // Validate the collaborator before touching the data.
    let calibration = match (config.error_correction, cfg.calibration_path) {
        (true, Some(path)) => {
            let cal = load_calibration_from_path(Path::new(path));
            Some(cal.unwrap_or_else(|e| super::fail(e)))
        }
        (true, None) => super::fail("--error-correction requires --calibration <json>"),
        (false, _) => None,
    };

    let symbols = super::load_symbols(cfg.input, cfg.registers);
    let outcomes = OutcomeSequence::parse(&symbols).unwrap_or_else(|e| super::fail(e));

    let estimator = StreamingEstimator::new(config);
    let entropy = estimator
        .run_mitigated(&outcomes, Some(&ReadoutMitigator), calibration.as_ref())
        .unwrap_or_else(|e| super::fail(e));

    let report = EstimateReport {
        shots: outcomes.len(),
        error_correction: config.error_correction,
        entangled_shots: outcomes.entangled_count(),
        final_entropy: entropy.last().copied(),
        entropy: &entropy,
    };
    print_summary(&report);

    if let Some(path) = cfg.output_path {
        super::write_json(path, &report);
    }
}

fn print_summary(report: &EstimateReport<'_>) {
    let mode = if report.error_correction {
        "readout-mitigated"
    } else {
        "raw"
    };
    println!(
        "{} shots ({} entangled), mode: {mode}\n",
        report.shots, report.entangled_shots
    );
    println!("  {:>8} {:>10}", "Shot", "S(ρ_A)");
    println!("  {}", "-".repeat(20));
    for i in preview_indices(report.entropy.len()) {
        println!("  {:>8} {:>10.4}", i + 1, report.entropy[i]);
    }
    if let Some(last) = report.final_entropy {
        println!("\nFinal estimate: {last:.4} bits");
    }
}

/// First and last rows of a long sequence.
fn preview_indices(len: usize) -> Vec<usize> {
    if len <= PREVIEW_ROWS {
        return (0..len).collect();
    }
    let half = PREVIEW_ROWS / 2;
    (0..half).chain(len - half..len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_sequence_shows_everything() {
        assert_eq!(preview_indices(3), vec![0, 1, 2]);
        assert!(preview_indices(0).is_empty());
    }

    #[test]
    fn preview_long_sequence_shows_head_and_tail() {
        assert_eq!(preview_indices(100), vec![0, 1, 2, 3, 4, 95, 96, 97, 98, 99]);
    }

    #[test]
    fn report_serializes_sequence() {
        let entropy = vec![0.0, 1.0];
        let report = EstimateReport {
            shots: 2,
            error_correction: false,
            entangled_shots: 1,
            final_entropy: Some(1.0),
            entropy: &entropy,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["shots"], 2);
        assert_eq!(json["entropy"][1], 1.0);
    }
}
