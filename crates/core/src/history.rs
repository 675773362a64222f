//! Rolling pair history
//!
//! Keeps the pair sets of the most recent partitions so new partitions can
//! steer away from repeat pairings. Records are held oldest first; the
//! newest record has the highest weight when scoring.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::models::{Pair, PairSet};

/// Number of past sessions retained by default
pub const DEFAULT_HISTORY_WINDOW: usize = 20;

/// Bounded log of past pair sets, oldest evicted first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairHistory {
    records: VecDeque<PairSet>,
    window: usize,
}

impl Default for PairHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW)
    }
}

impl PairHistory {
    pub fn new(window: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Build from stored records (oldest first), keeping only the newest `window`
    pub fn from_records(records: Vec<PairSet>, window: usize) -> Self {
        let mut history = Self::new(window);
        for record in records {
            history.push(record);
        }
        history
    }

    /// Append the newest record, evicting the oldest beyond the window
    pub fn push(&mut self, record: PairSet) {
        self.records.push_back(record);
        while self.records.len() > self.window {
            self.records.pop_front();
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &PairSet> {
        self.records.iter()
    }

    pub fn to_records(&self) -> Vec<PairSet> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Summed recency weight of every recorded pair
    ///
    /// The oldest record weighs 1 and the newest weighs `len()`. A record
    /// counts once per pair even if it holds that pair more than once.
    pub fn pair_weights(&self) -> HashMap<Pair, u64> {
        let mut weights: HashMap<Pair, u64> = HashMap::new();
        for (index, record) in self.records.iter().enumerate() {
            let weight = index as u64 + 1;
            let distinct: HashSet<&Pair> = record.pairs().iter().collect();
            for pair in distinct {
                *weights.entry(pair.clone()).or_default() += weight;
            }
        }
        weights
    }

    /// Repeat-pairing score of a partition; lower is better
    pub fn score(&self, groups: &[Vec<String>]) -> u64 {
        score_with(&self.pair_weights(), groups)
    }
}

/// Score a partition against precomputed pair weights
pub(crate) fn score_with(weights: &HashMap<Pair, u64>, groups: &[Vec<String>]) -> u64 {
    if weights.is_empty() {
        return 0;
    }
    PairSet::from_groups(groups)
        .pairs()
        .iter()
        .map(|pair| weights.get(pair).copied().unwrap_or(0))
        .sum()
}
