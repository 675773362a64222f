//! ClassGrid session layer
//!
//! Holds the live schedule and group sessions on top of `classgrid-core`,
//! persisting every change and reporting outcomes as notifications.

pub mod builder;
pub mod clipboard;
pub mod groups;
pub mod logging;
pub mod notify;
pub mod platform;
pub mod state;

pub use builder::ScheduleBuilder;
pub use clipboard::{ClipboardSink, SystemClipboard};
pub use groups::GroupGenerator;
pub use notify::{Level, Notification, Notifier};
pub use state::AppState;
