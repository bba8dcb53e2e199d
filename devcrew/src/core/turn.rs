//! Conversation turns.

use crate::core::stage::{Role, Stage};
use crate::utils::iso_timestamp;
use serde::{Deserialize, Serialize};

/// One appended entry in the conversation log.
///
/// Turns are immutable once created; the log they live in is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// The role that spoke.
    pub role: Role,
    /// The stage during which the turn was recorded.
    pub stage: Stage,
    /// The message text.
    pub text: String,
    /// When the turn was recorded (ISO 8601).
    pub timestamp: String,
}

impl Turn {
    /// Creates a new turn stamped with the current time.
    #[must_use]
    pub fn new(role: Role, stage: Stage, text: impl Into<String>) -> Self {
        Self {
            role,
            stage,
            text: text.into(),
            timestamp: iso_timestamp(),
        }
    }

    /// Formats the turn as a transcript line, `"{Role}: {text}"`.
    #[must_use]
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role.display_name(), self.text)
    }
}
