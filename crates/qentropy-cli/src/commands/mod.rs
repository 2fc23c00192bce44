pub mod bounds;
pub mod estimate;
pub mod exact;
pub mod random;

use std::io::Read;
use std::path::Path;

use qentropy_core::{EstimatorConfig, RegisterMemory, combine_registers};
use serde::Serialize;

/// Print an error and exit with status 1.
pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

/// Read the whole input, from stdin when `input` is "-".
fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input)
    }
}

/// One symbol per non-blank line. Inner whitespace is kept; the core
/// normalizes it.
pub fn parse_symbol_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Combined per-shot bitstrings from a JSON array of register memories.
pub fn parse_register_json(text: &str) -> Result<Vec<String>, String> {
    let registers: Vec<RegisterMemory> =
        serde_json::from_str(text).map_err(|e| format!("invalid register JSON: {e}"))?;
    combine_registers(&registers).map_err(|e| e.to_string())
}

/// Load outcome symbols from a line file or register JSON.
pub fn load_symbols(input: &str, registers: bool) -> Vec<String> {
    let text = match read_input(input) {
        Ok(t) => t,
        Err(e) => fail(format_args!("failed to read {input}: {e}")),
    };
    let symbols = if registers {
        parse_register_json(&text).unwrap_or_else(|e| fail(e))
    } else {
        parse_symbol_lines(&text)
    };
    log::debug!("loaded {} symbols from {input}", symbols.len());
    symbols
}

/// Estimator config from an optional JSON file, defaults otherwise.
pub fn load_config(path: Option<&str>) -> EstimatorConfig {
    match path {
        Some(p) => EstimatorConfig::from_json_path(Path::new(p)).unwrap_or_else(|e| fail(e)),
        None => EstimatorConfig::default(),
    }
}

/// Write pretty JSON to `path`.
pub fn write_json<T: Serialize>(path: &str, value: &T) {
    let json = match serde_json::to_string_pretty(value) {
        Ok(j) => j,
        Err(e) => fail(format_args!("failed to serialize output: {e}")),
    };
    match std::fs::write(path, json) {
        Ok(()) => println!("\nResults written to {path}"),
        Err(e) => fail(format_args!("failed to write {path}: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_lines_skip_blanks_and_trim() {
        let text = "0011\n\n  0 0 1 1  \r\n1001\n";
        assert_eq!(parse_symbol_lines(text), vec!["0011", "0 0 1 1", "1001"]);
    }

    #[test]
    fn empty_text_has_no_symbols() {
        assert!(parse_symbol_lines("\n \n").is_empty());
    }

    #[test]
    fn register_json_is_combined() {
        let text = r#"[
            {"name": "c0", "shots": ["11", "01"]},
            {"name": "c1", "shots": ["00", "10"]}
        ]"#;
        assert_eq!(parse_register_json(text).unwrap(), vec!["0011", "1001"]);
    }

    #[test]
    fn register_json_errors_are_reported() {
        let err = parse_register_json("not json").unwrap_err();
        assert!(err.contains("invalid register JSON"));
        let uneven = r#"[{"name": "a", "shots": ["1"]}, {"name": "b", "shots": []}]"#;
        assert!(parse_register_json(uneven).unwrap_err().contains("\"b\""));
    }

    #[test]
    fn load_config_defaults_without_path() {
        assert_eq!(load_config(None), EstimatorConfig::default());
    }

    #[test]
    fn load_symbols_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shots.txt");
        std::fs::write(&path, "0000\n0011\n").unwrap();
        let symbols = load_symbols(path.to_str().unwrap(), false);
        assert_eq!(symbols, vec!["0000", "0011"]);
    }
}
