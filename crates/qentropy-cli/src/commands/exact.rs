//! `qentropy exact` — entanglement entropy of a state vector.

use qentropy_core::{Complex64, DVector, StateInput, reduced_entropies};

/// Parse `[[re, im], ...]` into a state vector.
pub fn parse_state(text: &str) -> Result<DVector<Complex64>, String> {
    let pairs: Vec<[f64; 2]> =
        serde_json::from_str(text).map_err(|e| format!("invalid state JSON: {e}"))?;
    if pairs.is_empty() {
        return Err("state vector is empty".into());
    }
    Ok(DVector::from_iterator(
        pairs.len(),
        pairs.iter().map(|&[re, im]| Complex64::new(re, im)),
    ))
}

pub fn run(state: &str, dim_a: usize, dim_b: usize) {
    let text = std::fs::read_to_string(state)
        .unwrap_or_else(|e| super::fail(format_args!("failed to read {state}: {e}")));
    let psi = parse_state(&text).unwrap_or_else(|e| super::fail(e));
    let (s_a, s_b) = reduced_entropies(StateInput::Vector(&psi), dim_a, dim_b)
        .unwrap_or_else(|e| super::fail(e));

    println!("Bipartition {dim_a} × {dim_b} ({} amplitudes)", psi.len());
    println!("  S(ρ_A) = {s_a:.3} bits");
    println!("  S(ρ_B) = {s_b:.3} bits");
}
