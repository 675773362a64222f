//! Randomized group partitioning with repeat-pair avoidance
//!
//! A base partition is an unbiased shuffle dealt round-robin into buckets,
//! so group sizes differ by at most one. When a pair history is supplied
//! a bounded random search keeps the lowest-scoring candidate, stopping as
//! soon as a candidate repeats no recorded pair.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::history::{score_with, PairHistory};
use crate::invariants::assert_partition_input;
use crate::models::Groups;

/// Candidate budget for the history-aware search
pub const DEFAULT_SEARCH_ATTEMPTS: usize = 30;

/// How the caller sizes the partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMode {
    /// A fixed number of groups, capped at the number of people
    Count(usize),
    /// At least this many people per group
    ///
    /// The group count is `max(1, floor(names / size))`, so a remainder
    /// is spread over existing groups rather than forming a short one.
    PerGroup(usize),
}

impl GroupMode {
    /// Resolve the group count for a roster, validating the request
    pub fn group_count(&self, name_count: usize) -> Result<usize> {
        if name_count < 2 {
            return Err(Error::Validation("Enter at least 2 names".into()));
        }

        match *self {
            GroupMode::Count(0) => Err(Error::Validation(
                "Number of groups must be at least 1".into(),
            )),
            GroupMode::PerGroup(0) => Err(Error::Validation(
                "People per group must be at least 1".into(),
            )),
            GroupMode::Count(count) => Ok(count.min(name_count)),
            GroupMode::PerGroup(size) => Ok((name_count / size).max(1)),
        }
    }
}

/// Search tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionOptions {
    /// Maximum candidates generated when history exists
    pub attempts: usize,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_SEARCH_ATTEMPTS,
        }
    }
}

/// Result of a partition run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub groups: Groups,
    /// Repeat-pairing score of `groups` against the supplied history
    pub score: u64,
    /// Candidates generated, including the first
    pub attempts: usize,
}

impl Partition {
    pub fn into_groups(self) -> Groups {
        self.groups
    }
}

/// Shuffle `names` and deal them round-robin into `group_count` groups
pub fn random_partition<R: Rng + ?Sized>(names: &[String], group_count: usize, rng: &mut R) -> Groups {
    assert_partition_input(names, group_count);
    if group_count == 0 {
        return Vec::new();
    }

    let mut shuffled = names.to_vec();
    shuffled.shuffle(rng);

    let mut groups: Groups = vec![Vec::new(); group_count];
    for (i, name) in shuffled.into_iter().enumerate() {
        groups[i % group_count].push(name);
    }
    groups
}

/// Partition `names`, biased away from pairs recorded in `history`
///
/// With an empty history the first base partition is returned as is.
/// Otherwise candidates replace the best only on strict improvement, so
/// ties go to the earliest candidate.
pub fn partition<R: Rng + ?Sized>(
    names: &[String],
    group_count: usize,
    history: &PairHistory,
    options: PartitionOptions,
    rng: &mut R,
) -> Partition {
    let first = random_partition(names, group_count, rng);
    if history.is_empty() {
        return Partition {
            groups: first,
            score: 0,
            attempts: 1,
        };
    }

    let weights = history.pair_weights();
    let mut best = Partition {
        score: score_with(&weights, &first),
        groups: first,
        attempts: 1,
    };

    while best.score > 0 && best.attempts < options.attempts {
        let candidate = random_partition(names, group_count, rng);
        let score = score_with(&weights, &candidate);
        best.attempts += 1;
        if score < best.score {
            debug!(attempt = best.attempts, score, "Improved partition");
            best.groups = candidate;
            best.score = score;
        }
    }

    best
}
