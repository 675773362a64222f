//! ClassGrid Core Library
//!
//! Schedule models, conflict detection, group partitioning, share links,
//! export formats, and storage for ClassGrid.

pub mod config;
pub mod conflict;
pub mod error;
pub mod export;
pub mod grid;
pub mod history;
pub mod invariants;
pub mod models;
pub mod partition;
pub mod roster;
pub mod share;
pub mod storage;
pub mod validation;

pub use config::{AppConfig, ConfigError, GridConfig, GroupConfig, ShareConfig};
pub use conflict::{detect_conflicts, has_conflict};
pub use error::{Error, Result};
pub use export::{clipboard_text, csv_text};
pub use grid::{Block, GridWindow};
pub use history::{PairHistory, DEFAULT_HISTORY_WINDOW};
pub use models::*;
pub use partition::{
    partition, random_partition, GroupMode, Partition, PartitionOptions, DEFAULT_SEARCH_ATTEMPTS,
};
pub use roster::parse_roster;
pub use share::ShareLink;
pub use storage::{Database, PairHistoryRepository, ScheduleRepository, Storage};
pub use validation::EntryDraft;
