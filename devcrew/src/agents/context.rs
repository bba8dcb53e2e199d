//! Stage context construction.

use crate::core::Stage;
use crate::state::ProjectState;

/// The input a role agent works from: all prior artifacts plus the full
/// conversation transcript, captured at the moment the stage begins.
///
/// Construction is a pure function of `ProjectState`: rebuilding the context
/// for the same state prefix yields byte-identical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageContext {
    /// The stage about to execute.
    pub stage: Stage,
    /// The extracted requirements document text.
    pub initial_text: String,
    /// Prior artifacts in pipeline order, as `(stage, content)` pairs.
    pub prior_artifacts: Vec<(Stage, String)>,
    /// The conversation transcript up to this point.
    pub transcript: String,
}

impl StageContext {
    /// Builds the context for a stage from the current project state.
    #[must_use]
    pub fn build(state: &ProjectState, stage: Stage) -> Self {
        let prior_artifacts = state
            .artifacts_in_order()
            .iter()
            .map(|a| (a.stage, a.content.clone()))
            .collect();

        Self {
            stage,
            initial_text: state.initial_text.clone(),
            prior_artifacts,
            transcript: state.conversation.transcript(),
        }
    }

    /// Returns a prior artifact's content by stage.
    #[must_use]
    pub fn artifact(&self, stage: Stage) -> Option<&str> {
        self.prior_artifacts
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, content)| content.as_str())
    }

    /// Renders the full context as one deterministic string: the initial
    /// text, then each prior artifact under a stage header, then the
    /// transcript.
    #[must_use]
    pub fn rendered(&self) -> String {
        let mut out = String::new();
        out.push_str("Requirements document:\n");
        out.push_str(&self.initial_text);
        out.push('\n');

        for (stage, content) in &self.prior_artifacts {
            out.push_str(&format!("\n[{}]\n", stage.display_name()));
            out.push_str(content);
            out.push('\n');
        }

        out.push_str("\nConversation:\n");
        out.push_str(&self.transcript);
        out
    }
}
