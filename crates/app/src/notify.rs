//! One-shot user notifications
//!
//! Session operations push a short message for every user-visible outcome;
//! the view drains and shows them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use classgrid_core::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

/// Shared notification queue
///
/// Clones feed the same queue.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Level::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Level::Error, message.into());
    }

    /// Report a failed operation
    ///
    /// Validation and lookup failures show their own message; anything
    /// else is shown as `context` and logged in full.
    pub fn report(&self, context: &str, err: &Error) {
        match err {
            Error::Validation(message) | Error::NotFound(message) => self.error(message.clone()),
            other => {
                tracing::warn!(error = %other, "{}", context);
                self.error(context);
            }
        }
    }

    fn push(&self, level: Level, message: String) {
        self.queue().push(Notification { level, message });
    }

    /// Take every pending notification, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue())
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_order() {
        let notifier = Notifier::new();
        let view = notifier.clone();

        notifier.success("Class added");
        notifier.error("Select at least one day");

        let pending = view.drain();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].level, Level::Success);
        assert_eq!(pending[1].message, "Select at least one day");
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_report_messages() {
        let notifier = Notifier::new();
        notifier.report("Could not save", &Error::Validation("Enter at least 2 names".into()));
        notifier.report("Could not save", &Error::Decode("bad".into()));

        let messages: Vec<String> = notifier.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["Enter at least 2 names", "Could not save"]);
    }
}
