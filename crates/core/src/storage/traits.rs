//! Storage repository traits
//!
//! These traits define the persistence interface the session layer works
//! against. Loads never fail: missing or unreadable data comes back empty.

use crate::error::Result;
use crate::history::PairHistory;
use crate::models::ClassEntry;

/// Schedule persistence
pub trait ScheduleRepository {
    /// Load the saved schedule, or an empty one if it cannot be read
    fn load_entries(&self) -> Vec<ClassEntry>;

    /// Replace the saved schedule
    fn save_entries(&self, entries: &[ClassEntry]) -> Result<()>;
}

/// Pair history persistence
pub trait PairHistoryRepository {
    /// Load the newest `window` sessions, or an empty history if unreadable
    fn load_history(&self, window: usize) -> PairHistory;

    /// Replace the saved history
    fn save_history(&self, history: &PairHistory) -> Result<()>;

    /// Forget all sessions
    fn clear_history(&self) -> Result<()>;
}

/// Combined storage interface
pub trait Storage: ScheduleRepository + PairHistoryRepository {}

impl<T> Storage for T where T: ScheduleRepository + PairHistoryRepository {}
