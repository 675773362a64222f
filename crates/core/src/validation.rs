//! Entry form validation
//!
//! Raw form input is checked here before an entry is ever constructed, so
//! the conflict engine can assume well-formed times.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{ClassColor, ClockTime, Day, EntryFields};

/// Unvalidated entry input as typed by the user
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub name: String,
    pub instructor: String,
    pub location: String,
    pub days: Vec<Day>,
    pub start_time: String,
    pub end_time: String,
    pub color: Option<ClassColor>,
}

impl EntryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            ..Default::default()
        }
    }

    pub fn on(mut self, days: &[Day]) -> Self {
        self.days.extend_from_slice(days);
        self
    }

    pub fn at(mut self, start: &str, end: &str) -> Self {
        self.start_time = start.to_string();
        self.end_time = end.to_string();
        self
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_color(mut self, color: ClassColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Check the draft and produce entry fields
    ///
    /// `default_color` is used when the draft has no color picked.
    pub fn validate(&self, default_color: ClassColor) -> Result<EntryFields> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Class name is required".into()));
        }

        let days: BTreeSet<Day> = self.days.iter().copied().collect();
        if days.is_empty() {
            return Err(Error::Validation("Select at least one day".into()));
        }

        let start_time = ClockTime::parse(&self.start_time)?;
        let end_time = ClockTime::parse(&self.end_time)?;
        if end_time <= start_time {
            debug!(%start_time, %end_time, "Entry ends before it starts");
        }

        Ok(EntryFields {
            name: name.to_string(),
            instructor: non_empty(&self.instructor),
            location: non_empty(&self.location),
            days,
            start_time,
            end_time,
            color: self.color.unwrap_or(default_color),
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
