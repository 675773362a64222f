//! SQLite storage layer for ClassGrid

mod migrations;
mod pair_history;
mod parse;
mod schedule;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::{instrument, warn};

use crate::error::Result;
use crate::history::PairHistory;
use crate::invariants::assert_schedule_invariants;
use crate::models::ClassEntry;

pub use pair_history::PairHistoryStore;
pub use schedule::ScheduleStore;
pub use traits::{PairHistoryRepository, ScheduleRepository, Storage};

/// Database file name inside the data directory
pub const DATABASE_FILE: &str = "classgrid.db";

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get schedule store
    pub fn schedule(&self) -> ScheduleStore<'_> {
        ScheduleStore::new(&self.conn)
    }

    /// Get pair history store
    pub fn pair_history(&self) -> PairHistoryStore<'_> {
        PairHistoryStore::new(&self.conn)
    }
}

impl ScheduleRepository for Database {
    fn load_entries(&self) -> Vec<ClassEntry> {
        match self.schedule().load() {
            Ok(entries) => {
                assert_schedule_invariants(&entries);
                entries
            }
            Err(e) => {
                warn!(error = %e, "Stored schedule unreadable, starting empty");
                Vec::new()
            }
        }
    }

    fn save_entries(&self, entries: &[ClassEntry]) -> Result<()> {
        self.schedule().save(entries)
    }
}

impl PairHistoryRepository for Database {
    fn load_history(&self, window: usize) -> PairHistory {
        match self.pair_history().load() {
            Ok(records) => PairHistory::from_records(records, window),
            Err(e) => {
                warn!(error = %e, "Stored pair history unreadable, starting empty");
                PairHistory::new(window)
            }
        }
    }

    fn save_history(&self, history: &PairHistory) -> Result<()> {
        self.pair_history()
            .save(&history.to_records(), history.window())
    }

    fn clear_history(&self) -> Result<()> {
        self.pair_history().clear()
    }
}
