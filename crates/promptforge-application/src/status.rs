use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a presentation layer should keep a notice on screen.
pub const STATUS_NOTICE_TTL: Duration = Duration::from_secs(3);

/// Transient, user-facing confirmation of a history action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNotice {
    message: String,
}

impl StatusNotice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn entry_deleted() -> Self {
        Self::new("Entry deleted.")
    }

    pub fn history_cleared() -> Self {
        Self::new("History cleared successfully.")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn ttl(&self) -> Duration {
        STATUS_NOTICE_TTL
    }
}

impl std::fmt::Display for StatusNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
