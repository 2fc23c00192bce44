//! Measurement outcomes and per-run outcome counts.
//!
//! Hardware backends report each shot as a 4-character bitstring, sometimes
//! with separators between the characters (`"0011"` or `"0 0 1 1"`). Every
//! symbol passes through [`Outcome::parse`] exactly once at ingestion; all
//! downstream code compares canonical [`Outcome`] values and never looks at
//! the raw text again.
//!
//! # Canonical form
//!
//! An outcome is the integer value of its 4-bit pattern with the leftmost
//! character as the most significant bit, so `"0011"` is 3 and `"1001"` is 9.
//! [`OutcomeCounts`] is a fixed `[u64; 16]` indexed by that value.

use std::fmt;

use serde::Serialize;

use crate::error::{EntropyError, Result};

/// Number of characters in a normalized outcome.
pub const OUTCOME_BITS: usize = 4;

/// Number of distinct 4-bit patterns.
pub const PATTERN_COUNT: usize = 1 << OUTCOME_BITS;

/// A single normalized 4-bit measurement outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Outcome(u8);

impl Outcome {
    /// Pattern `0011`: first entangled signature.
    pub const ENTANGLED_LOW: Outcome = Outcome(0b0011);
    /// Pattern `1001`: second entangled signature.
    pub const ENTANGLED_HIGH: Outcome = Outcome(0b1001);

    /// Normalize a raw symbol. Whitespace anywhere in the symbol is stripped;
    /// the remainder must be exactly four `0`/`1` characters.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut value = 0u8;
        let mut len = 0usize;
        for ch in raw.chars().filter(|c| !c.is_whitespace()) {
            let bit = match ch {
                '0' => 0,
                '1' => 1,
                _ => return None,
            };
            len += 1;
            if len > OUTCOME_BITS {
                return None;
            }
            value = (value << 1) | bit;
        }
        (len == OUTCOME_BITS).then_some(Outcome(value))
    }

    /// Build an outcome from its pattern value (0..=15).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < PATTERN_COUNT).then_some(Outcome(index as u8))
    }

    /// Pattern value, usable as an index into a 16-entry table.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Bit at character position `pos` (0 = leftmost).
    pub fn bit(self, pos: usize) -> u8 {
        (self.0 >> (OUTCOME_BITS - 1 - pos)) & 1
    }

    /// Whether this outcome is one of the entangled signatures `0011` / `1001`.
    pub fn is_entangled(self) -> bool {
        self == Self::ENTANGLED_LOW || self == Self::ENTANGLED_HIGH
    }

    /// Iterate all 16 patterns in index order.
    pub fn all() -> impl Iterator<Item = Outcome> {
        (0..PATTERN_COUNT as u8).map(Outcome)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

impl Serialize for Outcome {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered, immutable sequence of outcomes from one experiment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeSequence {
    outcomes: Vec<Outcome>,
}

impl OutcomeSequence {
    /// Normalize every raw symbol, failing on the first one that is not a
    /// 4-bit pattern. Nothing is processed if any symbol is invalid.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self> {
        let outcomes = raw
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Outcome::parse(s.as_ref()).ok_or_else(|| EntropyError::InvalidOutcomeFormat {
                    index,
                    raw: s.as_ref().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { outcomes })
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outcome> {
        self.outcomes.iter()
    }

    pub fn as_slice(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Number of entangled-signature outcomes in the whole sequence.
    pub fn entangled_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_entangled()).count()
    }
}

impl From<Vec<Outcome>> for OutcomeSequence {
    fn from(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }
}

impl<'a> IntoIterator for &'a OutcomeSequence {
    type Item = &'a Outcome;
    type IntoIter = std::slice::Iter<'a, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

/// Occurrence count for each of the 16 patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeCounts {
    counts: [u64; PATTERN_COUNT],
}

impl OutcomeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, outcome: Outcome) {
        self.counts[outcome.index()] += 1;
    }

    pub fn get(&self, outcome: Outcome) -> u64 {
        self.counts[outcome.index()]
    }

    /// Total number of recorded shots.
    pub fn shots(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(pattern, count)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, u64)> + '_ {
        Outcome::all().map(|o| (o, self.counts[o.index()]))
    }

    pub fn as_array(&self) -> &[u64; PATTERN_COUNT] {
        &self.counts
    }

    /// Relative frequency of each pattern. All zero when nothing was recorded.
    pub fn probabilities(&self) -> [f64; PATTERN_COUNT] {
        let shots = self.shots();
        let mut out = [0.0; PATTERN_COUNT];
        if shots == 0 {
            return out;
        }
        for (p, &c) in out.iter_mut().zip(self.counts.iter()) {
            *p = c as f64 / shots as f64;
        }
        out
    }
}

impl<'a> FromIterator<&'a Outcome> for OutcomeCounts {
    fn from_iter<I: IntoIterator<Item = &'a Outcome>>(iter: I) -> Self {
        let mut counts = Self::new();
        for &o in iter {
            counts.increment(o);
        }
        counts
    }
}
