//! `qentropy bounds` — Hoeffding confidence sequence on the entangled proportion.

use qentropy_core::{ConfidenceBounds, OutcomeSequence, confidence_bounds};
use serde::Serialize;

#[derive(Serialize)]
struct BoundsReport<'a> {
    shots: usize,
    error_probability: f64,
    #[serde(flatten)]
    bounds: &'a ConfidenceBounds,
    entropy_bounds: Vec<(f64, f64)>,
}

pub fn run(
    input: &str,
    registers: bool,
    error_probability: Option<f64>,
    config_path: Option<&str>,
    output: Option<&str>,
) {
    let mut config = super::load_config(config_path);
    if let Some(delta) = error_probability {
        config.error_probability = delta;
    }

    let symbols = super::load_symbols(input, registers);
    let outcomes = OutcomeSequence::parse(&symbols).unwrap_or_else(|e| super::fail(e));
    let bounds =
        confidence_bounds(&outcomes, config.error_probability).unwrap_or_else(|e| super::fail(e));

    let coverage = (1.0 - config.error_probability) * 100.0;
    println!(
        "{} shots, {coverage:.1}% Hoeffding bounds on the entangled proportion\n",
        bounds.len()
    );
    if let Some(last) = bounds.len().checked_sub(1) {
        let (s_lo, s_hi) = bounds.entropy_bounds()[last];
        println!("  proportion  {:.4}", bounds.proportion[last]);
        let (lo, hi) = (bounds.lower[last], bounds.upper[last]);
        println!("  interval    [{lo:.4}, {hi:.4}]");
        println!("  entropy     [{s_lo:.4}, {s_hi:.4}] bits");
    }

    if let Some(path) = output {
        let report = BoundsReport {
            shots: bounds.len(),
            error_probability: config.error_probability,
            bounds: &bounds,
            entropy_bounds: bounds.entropy_bounds(),
        };
        super::write_json(path, &report);
    }
}
