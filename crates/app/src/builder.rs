//! Schedule builder session
//!
//! Owns the working list of class entries. Every mutation is written to
//! the database before it replaces the in-memory list, so a failed save
//! leaves the session exactly as it was.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use classgrid_core::grid::entries_on;
use classgrid_core::invariants::{assert_entry_invariants, assert_schedule_invariants};
use classgrid_core::{
    detect_conflicts, Block, ClassColor, ClassEntry, Database, Day, EntryDraft, Error, GridWindow,
    Result, ScheduleRepository, ShareLink,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::clipboard::ClipboardSink;
use crate::notify::Notifier;

/// One class block positioned in a day column
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub id: Uuid,
    pub block: Block,
    pub conflicting: bool,
}

pub struct ScheduleBuilder {
    db: Arc<Mutex<Database>>,
    entries: Vec<ClassEntry>,
    link: ShareLink,
    notifier: Notifier,
}

impl ScheduleBuilder {
    /// Start a session from whatever schedule is stored
    pub fn new(db: Arc<Mutex<Database>>, link: ShareLink, notifier: Notifier) -> Self {
        let entries = db
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .load_entries();
        Self {
            db,
            entries,
            link,
            notifier,
        }
    }

    fn db(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&ClassEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Color offered for the next new entry
    pub fn next_color(&self) -> ClassColor {
        ClassColor::next_unused(self.entries.iter().map(|e| &e.color))
    }

    /// Persist `next` and make it the working list
    fn commit(&mut self, next: Vec<ClassEntry>) -> Result<()> {
        assert_schedule_invariants(&next);
        if let Err(e) = self.db().save_entries(&next) {
            self.notifier.report("Could not save schedule", &e);
            return Err(e);
        }
        self.entries = next;
        Ok(())
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::NotFound("Class no longer exists".into()))
    }

    /// Add a class from form input
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub fn add(&mut self, draft: &EntryDraft) -> Result<Uuid> {
        let fields = draft
            .validate(self.next_color())
            .inspect_err(|e| self.notifier.report("Could not add class", e))?;

        let entry = ClassEntry::new(fields);
        assert_entry_invariants(&entry);
        let id = entry.id;

        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)?;

        self.notifier.success("Class added");
        Ok(id)
    }

    /// Replace every field of an existing class
    #[instrument(skip(self, draft))]
    pub fn update(&mut self, id: Uuid, draft: &EntryDraft) -> Result<()> {
        let index = self
            .position(id)
            .inspect_err(|e| self.notifier.report("Could not update class", e))?;
        let fields = draft
            .validate(self.entries[index].color)
            .inspect_err(|e| self.notifier.report("Could not update class", e))?;

        let mut next = self.entries.clone();
        next[index].apply(fields);
        self.commit(next)?;

        self.notifier.success("Class updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .position(id)
            .inspect_err(|e| self.notifier.report("Could not remove class", e))?;

        let mut next = self.entries.clone();
        next.remove(index);
        self.commit(next)?;

        self.notifier.success("Class removed");
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.commit(Vec::new())?;
        self.notifier.success("Schedule cleared");
        Ok(())
    }

    /// Ids of every entry that overlaps another, recomputed on each call
    pub fn conflicts(&self) -> HashSet<Uuid> {
        detect_conflicts(&self.entries)
    }

    /// Blocks for one day column, in schedule order
    pub fn day_column(&self, day: Day, window: &GridWindow) -> Vec<PlacedBlock> {
        let conflicts = self.conflicts();
        entries_on(&self.entries, day)
            .map(|entry| PlacedBlock {
                id: entry.id,
                block: window.block(entry),
                conflicting: conflicts.contains(&entry.id),
            })
            .collect()
    }

    /// Link carrying the whole schedule
    pub fn share_url(&self) -> Result<String> {
        self.link.url_for(&self.entries)
    }

    /// Copy the share link to the clipboard
    pub fn share_link(&self, clipboard: &dyn ClipboardSink) -> Option<String> {
        let url = match self.share_url() {
            Ok(url) => url,
            Err(e) => {
                self.notifier.report("Could not create share link", &e);
                return None;
            }
        };

        if clipboard.copy(&url) {
            self.notifier.success("Shareable link copied to clipboard!");
        } else {
            self.notifier.error("Could not copy link to clipboard");
        }
        Some(url)
    }

    /// Load a shared schedule into an empty session
    ///
    /// Returns the number of classes imported. A session that already has
    /// classes, or a link without a readable schedule, imports nothing.
    #[instrument(skip(self, link))]
    pub fn import_shared(&mut self, link: &str) -> Result<usize> {
        if !self.entries.is_empty() {
            info!("Schedule not empty, ignoring shared link");
            return Ok(0);
        }

        let shared = ShareLink::entries_from(link);
        if shared.is_empty() {
            return Ok(0);
        }

        let imported: Vec<ClassEntry> = shared.iter().map(ClassEntry::reissued).collect();
        let count = imported.len();
        self.commit(imported)?;

        info!(count, "Imported shared schedule");
        self.notifier.success(format!("Imported {} classes", count));
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::MemoryClipboard;
    use crate::notify::Level;

    fn session() -> (ScheduleBuilder, Notifier) {
        let db = Arc::new(Mutex::new(Database::open_in_memory().unwrap()));
        let notifier = Notifier::new();
        let builder = ScheduleBuilder::new(
            db,
            ShareLink::new("https://classgrid.app"),
            notifier.clone(),
        );
        (builder, notifier)
    }

    fn last_message(notifier: &Notifier) -> (Level, String) {
        let n = notifier.drain().pop().unwrap();
        (n.level, n.message)
    }

    #[test]
    fn test_add_assigns_unused_colors() {
        let (mut builder, notifier) = session();
        builder
            .add(&EntryDraft::new("Math").on(&[Day::Mon]))
            .unwrap();
        builder
            .add(&EntryDraft::new("Art").on(&[Day::Tue]))
            .unwrap();

        assert_eq!(builder.entries()[0].color, ClassColor::Blue);
        assert_eq!(builder.entries()[1].color, ClassColor::Rose);
        assert_eq!(last_message(&notifier), (Level::Success, "Class added".into()));
    }

    #[test]
    fn test_invalid_draft_changes_nothing() {
        let (mut builder, notifier) = session();
        assert!(builder.add(&EntryDraft::new("  ").on(&[Day::Mon])).is_err());
        assert!(builder.add(&EntryDraft::new("Bio")).is_err());
        assert!(builder.entries().is_empty());

        let pending = notifier.drain();
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|n| n.level == Level::Error));
        assert_eq!(pending[1].message, "Select at least one day");
    }

    #[test]
    fn test_update_and_delete() {
        let (mut builder, notifier) = session();
        let id = builder
            .add(&EntryDraft::new("Chem").on(&[Day::Wed]).with_color(ClassColor::Teal))
            .unwrap();

        builder
            .update(id, &EntryDraft::new("Chem Lab").on(&[Day::Wed, Day::Fri]).at("13:00", "15:00"))
            .unwrap();
        let entry = builder.get(id).unwrap();
        assert_eq!(entry.name, "Chem Lab");
        assert_eq!(entry.color, ClassColor::Teal);
        assert_eq!(entry.duration_minutes(), 120);

        builder.delete(id).unwrap();
        assert!(builder.entries().is_empty());
        assert_eq!(last_message(&notifier), (Level::Success, "Class removed".into()));

        assert!(matches!(builder.delete(id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_conflicts_follow_edits() {
        let (mut builder, _) = session();
        let a = builder
            .add(&EntryDraft::new("A").on(&[Day::Mon]).at("09:00", "10:00"))
            .unwrap();
        let b = builder
            .add(&EntryDraft::new("B").on(&[Day::Mon]).at("09:30", "10:30"))
            .unwrap();
        assert_eq!(builder.conflicts(), HashSet::from([a, b]));

        let column = builder.day_column(Day::Mon, &GridWindow::default());
        assert_eq!(column.len(), 2);
        assert!(column.iter().all(|p| p.conflicting));
        assert_eq!(column[0].block.top, 120.0);

        builder
            .update(b, &EntryDraft::new("B").on(&[Day::Mon]).at("10:00", "11:00"))
            .unwrap();
        assert!(builder.conflicts().is_empty());
    }

    #[test]
    fn test_changes_persist() {
        let db = Arc::new(Mutex::new(Database::open_in_memory().unwrap()));
        let link = ShareLink::new("https://classgrid.app");
        let mut builder = ScheduleBuilder::new(db.clone(), link.clone(), Notifier::new());
        builder
            .add(&EntryDraft::new("Latin").on(&[Day::Thu]))
            .unwrap();

        let reopened = ScheduleBuilder::new(db.clone(), link.clone(), Notifier::new());
        assert_eq!(reopened.entries(), builder.entries());

        builder.clear_all().unwrap();
        assert!(ScheduleBuilder::new(db, link, Notifier::new()).entries().is_empty());
    }

    #[test]
    fn test_share_and_import() {
        let (mut source, notifier) = session();
        source
            .add(&EntryDraft::new("Physics").on(&[Day::Mon, Day::Wed]).at("08:00", "09:15"))
            .unwrap();
        notifier.drain();

        let clipboard = MemoryClipboard::default();
        let url = source.share_link(&clipboard).unwrap();
        assert_eq!(clipboard.last(), Some(url.clone()));
        assert_eq!(
            last_message(&notifier),
            (Level::Success, "Shareable link copied to clipboard!".into())
        );

        let (mut target, _) = session();
        assert_eq!(target.import_shared(&url).unwrap(), 1);
        let imported = &target.entries()[0];
        assert_ne!(imported.id, source.entries()[0].id);
        assert_eq!(imported.fields(), source.entries()[0].fields());

        // A non-empty session ignores further links
        assert_eq!(target.import_shared(&url).unwrap(), 0);
        assert_eq!(target.entries().len(), 1);
    }

    #[test]
    fn test_import_garbage_is_ignored() {
        let (mut builder, notifier) = session();
        assert_eq!(
            builder
                .import_shared("https://classgrid.app/builder?s=%%%")
                .unwrap(),
            0
        );
        assert!(builder.entries().is_empty());
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_share_with_broken_clipboard() {
        let (builder, notifier) = session();
        assert!(builder.share_link(&MemoryClipboard::broken()).is_some());
        assert_eq!(last_message(&notifier).0, Level::Error);
    }
}
