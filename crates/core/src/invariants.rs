//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::ClassEntry;

/// Validate that an entry is internally consistent
pub fn assert_entry_invariants(entry: &ClassEntry) {
    debug_assert!(
        !entry.name.trim().is_empty(),
        "Entry {} has empty name",
        entry.id
    );

    debug_assert!(!entry.days.is_empty(), "Entry {} has no days", entry.id);
}

/// Validate that a schedule has unique ids and consistent entries
pub fn assert_schedule_invariants(entries: &[ClassEntry]) {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        assert_entry_invariants(entry);
        debug_assert!(
            seen.insert(entry.id),
            "Duplicate entry id {} in schedule",
            entry.id
        );
    }
}

/// Validate partitioner input
///
/// Callers resolve and validate the group count before partitioning.
pub fn assert_partition_input(names: &[String], group_count: usize) {
    debug_assert!(group_count >= 1, "Partition requested with zero groups");
    debug_assert!(
        group_count <= names.len().max(1),
        "Partition requested {} groups for {} names",
        group_count,
        names.len()
    );
}
