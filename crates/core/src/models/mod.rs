//! Data models for ClassGrid

mod day;
mod entry;
mod group;
mod time;

pub use day::*;
pub use entry::*;
pub use group::*;
pub use time::*;
