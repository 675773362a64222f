//! Pair history persistence for the group generator

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::instrument;

use crate::error::Result;
use crate::models::PairSet;

pub struct PairHistoryStore<'a> {
    conn: &'a Connection,
}

impl<'a> PairHistoryStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Load recorded sessions, oldest first
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Vec<PairSet>> {
        let mut stmt = self
            .conn
            .prepare("SELECT pairs_json FROM pair_history ORDER BY id")?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(rows.len());
        for json in rows {
            records.push(serde_json::from_str(&json)?);
        }
        Ok(records)
    }

    /// Replace stored history with the newest `window` records
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn save(&self, records: &[PairSet], window: usize) -> Result<()> {
        let keep = &records[records.len().saturating_sub(window)..];

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM pair_history", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO pair_history (pairs_json, recorded_at) VALUES (?1, ?2)",
            )?;
            let now = Utc::now().to_rfc3339();
            for record in keep {
                stmt.execute(params![serde_json::to_string(record)?, now])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Forget all recorded sessions
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM pair_history", [])?;
        Ok(())
    }
}
