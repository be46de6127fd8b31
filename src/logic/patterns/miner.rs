//! Distinctive signature sequence miner
//!
//! Counts every k-gram of signatures inside attack runs and inside benign
//! runs, then keeps the k-grams that only ever show up during attacks.

use std::collections::HashSet;

use serde::Serialize;

use crate::logic::dataset::record::Event;

use super::runs::{extract_subsequences, segment_runs, Run};
use super::table::{FrequencyTable, Pattern};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistinctivePattern {
    pub pattern: Pattern,
    pub frequency: u64,
}

impl std::fmt::Display for DistinctivePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pattern: ({}), Frequenza: {}", self.pattern.join(", "), self.frequency)
    }
}

/// Both frequency tables plus the selected patterns. Table keys borrow the
/// signatures of the mined events.
#[derive(Debug, Clone, Default)]
pub struct MiningResult<'a> {
    pub attack: FrequencyTable<'a>,
    pub non_attack: FrequencyTable<'a>,
    pub distinctive: Vec<DistinctivePattern>,
}

// ============================================================================
// MINER
// ============================================================================

#[derive(Debug, Clone)]
pub struct PatternMiner {
    lengths: Vec<usize>,
    min_frequency: u64,
}

impl PatternMiner {
    /// `lengths` is a set: repeated lengths are counted once, first
    /// occurrence order kept.
    pub fn new(lengths: Vec<usize>, min_frequency: u64) -> Self {
        let mut seen = HashSet::new();
        let lengths = lengths.into_iter().filter(|l| seen.insert(*l)).collect();
        Self {
            lengths,
            min_frequency,
        }
    }

    pub fn mine<'a>(&self, events: &'a [Event]) -> MiningResult<'a> {
        let mut attack = FrequencyTable::new();
        let mut non_attack = FrequencyTable::new();

        let runs = segment_runs(events);
        for run in &runs {
            let table = if run.is_attack { &mut attack } else { &mut non_attack };
            self.count_run(run, table);
        }

        let distinctive = self.select_distinctive(&attack, &non_attack);
        log::debug!("Mined {} label runs", runs.len());

        MiningResult {
            attack,
            non_attack,
            distinctive,
        }
    }

    fn count_run<'a>(&self, run: &Run<'a>, table: &mut FrequencyTable<'a>) {
        let signatures = run.signatures();
        for &length in &self.lengths {
            for gram in extract_subsequences(signatures.as_slice(), length) {
                table.increment(gram);
            }
        }
    }

    /// Attack-only patterns above the frequency floor, most frequent first.
    /// Equal counts keep first-seen order.
    fn select_distinctive<'a>(
        &self,
        attack: &FrequencyTable<'a>,
        non_attack: &FrequencyTable<'a>,
    ) -> Vec<DistinctivePattern> {
        let mut selected: Vec<DistinctivePattern> = attack
            .iter()
            .filter(|(pattern, count)| !non_attack.contains(pattern) && *count > self.min_frequency)
            .map(|(pattern, count)| DistinctivePattern {
                pattern: pattern.iter().map(|s| s.to_string()).collect(),
                frequency: count,
            })
            .collect();

        selected.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        selected
    }
}

/// Attack-only signature sequences of the given lengths seen strictly more
/// than `min_frequency` times, most frequent first
pub fn mine(events: &[Event], lengths: &[usize], min_frequency: u64) -> Vec<DistinctivePattern> {
    let result = PatternMiner::new(lengths.to_vec(), min_frequency).mine(events);
    log::info!(
        "Mined {} events: {} attack patterns, {} benign patterns, {} distinctive",
        events.len(),
        result.attack.len(),
        result.non_attack.len(),
        result.distinctive.len()
    );
    result.distinctive
}
