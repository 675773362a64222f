//! Schedule conflict detection
//!
//! Two entries conflict when they share a weekday and their time ranges
//! overlap as half-open intervals `[start, end)`. Back-to-back classes do
//! not conflict.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::ClassEntry;

/// Whether two distinct entries overlap on a shared day
pub fn has_conflict(a: &ClassEntry, b: &ClassEntry) -> bool {
    if a.id == b.id {
        return false;
    }

    if a.days.is_disjoint(&b.days) {
        return false;
    }

    let (a_start, a_end) = (a.start_time.minutes(), a.end_time.minutes());
    let (b_start, b_end) = (b.start_time.minutes(), b.end_time.minutes());
    a_start < b_end && b_start < a_end
}

/// Ids of every entry involved in at least one conflict
///
/// Recomputed from scratch on each call; O(n²) in the number of entries.
pub fn detect_conflicts(entries: &[ClassEntry]) -> HashSet<Uuid> {
    let mut conflicts = HashSet::new();
    for (i, a) in entries.iter().enumerate() {
        for b in &entries[i + 1..] {
            if has_conflict(a, b) {
                conflicts.insert(a.id);
                conflicts.insert(b.id);
            }
        }
    }
    conflicts
}
