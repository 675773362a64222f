//! Clipboard access

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::platform::DisplayServer;

/// Destination for copied text
pub trait ClipboardSink {
    /// Copy `text`, returning whether it landed
    fn copy(&self, text: &str) -> bool;
}

/// The desktop clipboard
#[derive(Debug, Clone, Copy)]
pub struct SystemClipboard {
    display: DisplayServer,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            display: DisplayServer::detect(),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&self, text: &str) -> bool {
        if let Ok(mut clipboard) = arboard::Clipboard::new() {
            if clipboard.set_text(text).is_ok() {
                debug!("Copied to clipboard via arboard");
                return true;
            }
        }

        if self.display.is_wayland() && try_wl_copy(text) {
            debug!("Copied to clipboard via wl-copy");
            return true;
        }

        warn!(display = %self.display, "All clipboard methods failed");
        false
    }
}

/// Pipe `text` into `wl-copy`
fn try_wl_copy(text: &str) -> bool {
    let mut child = match Command::new("wl-copy")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(_) => return false,
    };

    if let Some(mut stdin) = child.stdin.take() {
        if stdin.write_all(text.as_bytes()).is_err() {
            return false;
        }
    }

    matches!(child.wait(), Ok(status) if status.success())
}
