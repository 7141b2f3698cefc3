//! Transient user-facing messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message shown when a run is requested without the required files.
pub const MISSING_FILES_MESSAGE: &str = "Please select both Video and Subtitles!";

/// Prefix of the message shown when a run completes.
pub const SAVED_MESSAGE_PREFIX: &str = "Saved to Downloads: ";

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

/// A single notification occupying the notification slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,

    /// Monotonic id assigned by the surface; a clear timer only removes
    /// the notification with the id it was scheduled for.
    #[serde(default)]
    pub id: u64,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            id: 0,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    /// Completion notification for the given output file.
    pub fn saved(output_name: &str) -> Self {
        Self::success(format!("{SAVED_MESSAGE_PREFIX}{output_name}"))
    }

    /// Validation failure for a run started without video or subtitles.
    pub fn missing_files() -> Self {
        Self::error(MISSING_FILES_MESSAGE)
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NotificationKind::Success => "OK",
            NotificationKind::Error => "ERROR",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}
