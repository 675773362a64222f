//! Group and pairing models

use serde::{Deserialize, Serialize};

/// An ordered sequence of groups, each an ordered sequence of names
pub type Groups = Vec<Vec<String>>;

/// Two names that shared a group, stored in sorted order
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pair(String, String);

impl Pair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Pair(a, b)
        } else {
            Pair(b, a)
        }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

/// Every pair produced by one partition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairSet(Vec<Pair>);

impl PairSet {
    /// Collect every within-group pair of a partition
    pub fn from_groups(groups: &[Vec<String>]) -> Self {
        let mut pairs = Vec::new();
        for group in groups {
            for (i, a) in group.iter().enumerate() {
                for b in &group[i + 1..] {
                    pairs.push(Pair::new(a.as_str(), b.as_str()));
                }
            }
        }
        Self(pairs)
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.0
    }

    pub fn contains(&self, pair: &Pair) -> bool {
        self.0.contains(pair)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Pair> for PairSet {
    fn from_iter<I: IntoIterator<Item = Pair>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
