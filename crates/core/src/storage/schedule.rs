//! Class schedule persistence
//!
//! The whole entry list is saved and loaded at once, in list order.

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::instrument;

use super::parse::{
    color_from_str, parse_days, parse_name, parse_time, parse_uuid, serialize_days,
};
use crate::error::Result;
use crate::models::ClassEntry;

pub struct ScheduleStore<'a> {
    conn: &'a Connection,
}

impl<'a> ScheduleStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Load every entry in list order
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Vec<ClassEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, instructor, location, days, start_time, end_time, color
             FROM class_entries ORDER BY position",
        )?;

        let entries = stmt
            .query_map([], |row| {
                Ok(ClassEntry {
                    id: parse_uuid(0, &row.get::<_, String>(0)?)?,
                    name: parse_name(1, row.get(1)?)?,
                    instructor: row.get(2)?,
                    location: row.get(3)?,
                    days: parse_days(4, &row.get::<_, String>(4)?)?,
                    start_time: parse_time(5, &row.get::<_, String>(5)?)?,
                    end_time: parse_time(6, &row.get::<_, String>(6)?)?,
                    color: color_from_str(&row.get::<_, String>(7)?),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Replace the stored schedule with `entries`
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub fn save(&self, entries: &[ClassEntry]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM class_entries", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO class_entries
                 (id, position, name, instructor, location, days, start_time, end_time, color, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            let now = Utc::now().to_rfc3339();
            for (position, entry) in entries.iter().enumerate() {
                stmt.execute(params![
                    entry.id.to_string(),
                    position as i64,
                    entry.name,
                    entry.instructor,
                    entry.location,
                    serialize_days(&entry.days),
                    entry.start_time.to_string(),
                    entry.end_time.to_string(),
                    entry.color.display_name().to_lowercase(),
                    now,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Number of stored entries
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM class_entries", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
