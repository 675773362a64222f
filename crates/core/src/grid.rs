//! Weekly grid layout
//!
//! Pixel placement of class blocks on a vertical time grid. Rendering
//! itself lives in the view; this only does the arithmetic.

use crate::error::{Error, Result};
use crate::models::{ClassEntry, Day, ALL_DAYS, WEEKDAYS};

/// Shortest block drawn, in pixels
pub const MIN_BLOCK_HEIGHT: f32 = 20.0;

/// Vertical placement of one block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub top: f32,
    pub height: f32,
}

/// Visible hour range and scale of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridWindow {
    pub start_hour: u8,
    pub end_hour: u8,
    pub hour_height: f32,
}

impl Default for GridWindow {
    fn default() -> Self {
        Self {
            start_hour: 7,
            end_hour: 22,
            hour_height: 60.0,
        }
    }
}

impl GridWindow {
    pub fn new(start_hour: u8, end_hour: u8, hour_height: f32) -> Result<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(Error::Validation(format!(
                "Grid hours {}..{} are not a valid range",
                start_hour, end_hour
            )));
        }
        if hour_height <= 0.0 {
            return Err(Error::Validation("Hour height must be positive".into()));
        }
        Ok(Self {
            start_hour,
            end_hour,
            hour_height,
        })
    }

    /// Total grid height in pixels
    pub fn total_height(&self) -> f32 {
        (self.end_hour - self.start_hour) as f32 * self.hour_height
    }

    /// Hours that get a label and a rule line, inclusive of both ends
    pub fn hours(&self) -> impl Iterator<Item = u8> {
        self.start_hour..=self.end_hour
    }

    /// Offset of an hour line from the top of the grid
    pub fn hour_offset(&self, hour: u8) -> f32 {
        (hour as f32 - self.start_hour as f32) * self.hour_height
    }

    /// Placement of an entry's block
    pub fn block(&self, entry: &ClassEntry) -> Block {
        let start = entry.start_time.minutes() as f32;
        let end = entry.end_time.minutes() as f32;
        let top = (start - self.start_hour as f32 * 60.0) / 60.0 * self.hour_height;
        let height = (end - start) / 60.0 * self.hour_height;
        Block {
            top,
            height: height.max(MIN_BLOCK_HEIGHT),
        }
    }
}

/// Day columns shown on the grid
pub fn visible_days(show_weekend: bool) -> &'static [Day] {
    if show_weekend {
        &ALL_DAYS
    } else {
        &WEEKDAYS
    }
}

/// Entries drawn in one day column, in schedule order
pub fn entries_on(entries: &[ClassEntry], day: Day) -> impl Iterator<Item = &ClassEntry> {
    entries.iter().filter(move |e| e.meets_on(day))
}

/// Hour label such as `7 AM` or `12 PM`
pub fn hour_label(hour: u8) -> String {
    match hour % 24 {
        0 => "12 AM".to_string(),
        h @ 1..=11 => format!("{} AM", h),
        12 => "12 PM".to_string(),
        h => format!("{} PM", h - 12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassColor, ClockTime, EntryFields};

    fn entry(start: &str, end: &str) -> ClassEntry {
        ClassEntry::new(EntryFields {
            name: "Lab".to_string(),
            instructor: None,
            location: None,
            days: [Day::Tue].into_iter().collect(),
            start_time: ClockTime::parse(start).unwrap(),
            end_time: ClockTime::parse(end).unwrap(),
            color: ClassColor::Blue,
        })
    }

    #[test]
    fn test_block_placement() {
        let grid = GridWindow::default();
        let block = grid.block(&entry("09:30", "11:00"));
        assert_eq!(block.top, 150.0);
        assert_eq!(block.height, 90.0);
    }

    #[test]
    fn test_short_block_has_min_height() {
        let grid = GridWindow::default();
        assert_eq!(grid.block(&entry("08:00", "08:10")).height, MIN_BLOCK_HEIGHT);
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = GridWindow::default();
        assert_eq!(grid.total_height(), 900.0);
        assert_eq!(grid.hours().count(), 16);
        assert_eq!(grid.hour_offset(8), 60.0);
    }

    #[test]
    fn test_invalid_window() {
        assert!(GridWindow::new(10, 10, 60.0).is_err());
        assert!(GridWindow::new(8, 25, 60.0).is_err());
        assert!(GridWindow::new(8, 18, 0.0).is_err());
        assert!(GridWindow::new(0, 24, 40.0).is_ok());
    }

    #[test]
    fn test_days_and_labels() {
        assert_eq!(visible_days(false).len(), 5);
        assert_eq!(visible_days(true).last(), Some(&Day::Sun));
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(7), "7 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(22), "10 PM");
    }

    #[test]
    fn test_entries_on() {
        let entries = vec![entry("09:00", "10:00")];
        assert_eq!(entries_on(&entries, Day::Tue).count(), 1);
        assert_eq!(entries_on(&entries, Day::Wed).count(), 0);
    }
}
