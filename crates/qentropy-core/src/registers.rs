//! Adapter from per-register measurement memory to combined bitstrings.
//!
//! Backends return one ordered list of per-shot symbols per classical
//! register. The combined bitstring for a shot concatenates the registers'
//! symbols in reverse declared order, so the last declared register supplies
//! the leftmost characters.

use serde::{Deserialize, Serialize};

use crate::error::{EntropyError, Result};

/// Shot memory of one classical register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMemory {
    pub name: String,
    pub shots: Vec<String>,
}

impl RegisterMemory {
    pub fn new(name: impl Into<String>, shots: Vec<String>) -> Self {
        Self {
            name: name.into(),
            shots,
        }
    }
}

/// Combine registers into one bitstring per shot.
///
/// All registers must have the same number of shots; the first register
/// sets the expected count.
pub fn combine_registers(registers: &[RegisterMemory]) -> Result<Vec<String>> {
    let Some(first) = registers.first() else {
        return Ok(Vec::new());
    };
    let n_shots = first.shots.len();
    if let Some(bad) = registers.iter().find(|r| r.shots.len() != n_shots) {
        return Err(EntropyError::RegisterLengthMismatch {
            register: bad.name.clone(),
            expected: n_shots,
            actual: bad.shots.len(),
        });
    }

    let combined = (0..n_shots)
        .map(|idx| {
            registers
                .iter()
                .rev()
                .map(|r| r.shots[idx].as_str())
                .collect::<String>()
        })
        .collect();
    Ok(combined)
}
