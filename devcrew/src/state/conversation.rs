//! Append-only conversation log.

use crate::core::Turn;
use serde::{Deserialize, Serialize};

/// Ordered record of every role's utterances.
///
/// Serves as both audit trail and contextual memory fed into later stages.
/// Turns are only ever appended; nothing is edited, reordered, or removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn. Unconditional; the log never rejects an append.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Returns all turns in append order.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the most recent turn, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Returns the number of turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if no turns have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Renders the log as a transcript, one `"{Role}: {text}"` line per turn.
    #[must_use]
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            out.push_str(&turn.transcript_line());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Role, Stage};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_preserves_order() {
        let mut log = ConversationLog::new();
        log.append(Turn::new(Role::ProjectManager, Stage::Requirements, "plan"));
        log.append(Turn::new(Role::Designer, Stage::Design, "wireframes"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.turns()[0].role, Role::ProjectManager);
        assert_eq!(log.last().unwrap().role, Role::Designer);
    }

    #[test]
    fn test_transcript_format() {
        let mut log = ConversationLog::new();
        log.append(Turn::new(Role::Tester, Stage::TestPlan, "12 cases"));

        assert_eq!(log.transcript(), "Tester: 12 cases\n");
    }

    #[test]
    fn test_empty_transcript() {
        assert_eq!(ConversationLog::new().transcript(), "");
    }
}
