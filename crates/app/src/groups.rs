//! Group generator session

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use classgrid_core::{
    clipboard_text, csv_text, parse_roster, partition, Database, Error, GroupConfig, GroupMode,
    Groups, PairHistory, PairHistoryRepository, PairSet, PartitionOptions, Result,
};
use rand::Rng;
use tracing::{info, instrument, warn};

use crate::clipboard::ClipboardSink;
use crate::notify::Notifier;

/// File name used for CSV export
pub const CSV_FILE: &str = "groups.csv";

/// Roster and sizing of the last successful generation
#[derive(Debug, Clone)]
struct Request {
    names: Vec<String>,
    group_count: usize,
}

pub struct GroupGenerator {
    db: Arc<Mutex<Database>>,
    history: PairHistory,
    options: PartitionOptions,
    groups: Option<Groups>,
    last_request: Option<Request>,
    notifier: Notifier,
}

impl GroupGenerator {
    /// Start a session over the stored pair history
    pub fn new(db: Arc<Mutex<Database>>, config: &GroupConfig, notifier: Notifier) -> Self {
        let history = db
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .load_history(config.history_window);
        Self {
            db,
            history,
            options: PartitionOptions {
                attempts: config.search_attempts,
            },
            groups: None,
            last_request: None,
            notifier,
        }
    }

    fn db(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current groups, if any have been generated
    pub fn groups(&self) -> Option<&Groups> {
        self.groups.as_ref()
    }

    pub fn history(&self) -> &PairHistory {
        &self.history
    }

    /// Split a pasted roster into groups
    ///
    /// The roster has one name per line. The result is biased away from
    /// pairs in the history and then recorded in it.
    #[instrument(skip(self, roster_text, rng))]
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        roster_text: &str,
        mode: GroupMode,
        rng: &mut R,
    ) -> Result<&Groups> {
        let names = parse_roster(roster_text);
        let group_count = mode
            .group_count(names.len())
            .inspect_err(|e| self.notifier.report("Could not generate groups", e))?;

        self.run(Request { names, group_count }, rng)
    }

    /// Generate again from the last roster and sizing
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Groups> {
        let request = self
            .last_request
            .clone()
            .ok_or_else(|| Error::Validation("Generate groups first".into()))
            .inspect_err(|e| self.notifier.report("Could not generate groups", e))?;

        self.run(request, rng)
    }

    fn run<R: Rng + ?Sized>(&mut self, request: Request, rng: &mut R) -> Result<&Groups> {
        let result = partition(
            &request.names,
            request.group_count,
            &self.history,
            self.options,
            rng,
        );
        info!(
            names = request.names.len(),
            groups = request.group_count,
            score = result.score,
            attempts = result.attempts,
            "Generated groups"
        );

        self.record(PairSet::from_groups(&result.groups));
        self.last_request = Some(request);
        Ok(&*self.groups.insert(result.groups))
    }

    /// Add a session to the history, on disk first and then in memory
    fn record(&mut self, pairs: PairSet) {
        let mut next = self.history.clone();
        next.push(pairs);
        let saved = self.db().save_history(&next);
        match saved {
            Ok(()) => self.history = next,
            Err(e) => warn!(error = %e, "Could not persist pair history"),
        }
    }

    /// Move one member between groups, or within a group
    ///
    /// `to_index` is the position in the destination after removal and is
    /// clamped to the end of that group. History is not touched.
    pub fn move_member(
        &mut self,
        from_group: usize,
        from_index: usize,
        to_group: usize,
        to_index: usize,
    ) -> Result<()> {
        let Some(groups) = self.groups.as_mut() else {
            return Err(Error::NotFound("No groups generated".into()));
        };
        if to_group >= groups.len() || from_index >= groups.get(from_group).map_or(0, Vec::len) {
            return Err(Error::NotFound(format!(
                "No member at group {} position {}",
                from_group, from_index
            )));
        }

        let member = groups[from_group].remove(from_index);
        let destination = &mut groups[to_group];
        let at = to_index.min(destination.len());
        destination.insert(at, member);
        Ok(())
    }

    /// Copy the groups as plain text
    pub fn copy_results(&self, clipboard: &dyn ClipboardSink) -> bool {
        let Some(groups) = &self.groups else {
            return false;
        };

        let copied = clipboard.copy(&clipboard_text(groups));
        if copied {
            self.notifier.success("Results copied to clipboard");
        } else {
            self.notifier.error("Could not copy results to clipboard");
        }
        copied
    }

    /// Groups as CSV, one column per group
    pub fn csv(&self) -> Option<String> {
        self.groups.as_deref().map(csv_text)
    }

    /// Write `groups.csv` into `dir`
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn write_csv(&self, dir: &Path) -> Result<PathBuf> {
        let csv = self
            .csv()
            .ok_or_else(|| Error::NotFound("No groups generated".into()))?;

        let path = dir.join(CSV_FILE);
        std::fs::write(&path, csv)
            .map_err(Error::from)
            .inspect_err(|e| self.notifier.report("Could not save CSV", e))?;

        info!(path = %path.display(), "Wrote groups CSV");
        self.notifier.success("CSV downloaded");
        Ok(path)
    }

    /// Forget every recorded session
    pub fn clear_history(&mut self) -> Result<()> {
        self.db()
            .clear_history()
            .inspect_err(|e| self.notifier.report("Could not clear pair history", e))?;

        self.history.clear();
        self.notifier.success("Pair history cleared");
        Ok(())
    }
}
