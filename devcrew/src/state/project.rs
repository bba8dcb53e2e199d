//! The single mutable aggregate threaded through the pipeline.

use crate::core::{Artifact, RunStatus, Stage, Turn};
use crate::state::{ArtifactStore, ConversationLog};
use crate::utils::{generate_uuid, iso_timestamp};
use serde::{Deserialize, Serialize};

/// Shared project state for one pipeline run.
///
/// Owned exclusively by a single run; the executor is the only writer.
/// Consumers get read-only views once the run reaches a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectState {
    /// Unique identifier for this run.
    pub run_id: String,
    /// The extracted requirements text the pipeline was seeded with.
    pub initial_text: String,
    /// Completed stage artifacts, write-once per stage.
    pub artifacts: ArtifactStore,
    /// Append-only conversation history.
    pub conversation: ConversationLog,
    /// The stage currently executing or next to execute.
    /// `None` once the presentation stage has completed.
    pub current_stage: Option<Stage>,
    /// Process-wide run status.
    pub status: RunStatus,
    /// When the state was created (ISO 8601).
    pub created_at: String,
}

impl ProjectState {
    /// Creates a fresh state seeded with extracted document text.
    #[must_use]
    pub fn new(initial_text: impl Into<String>) -> Self {
        Self {
            run_id: generate_uuid(),
            initial_text: initial_text.into(),
            artifacts: ArtifactStore::new(),
            conversation: ConversationLog::new(),
            current_stage: Some(Stage::Requirements),
            status: RunStatus::NotStarted,
            created_at: iso_timestamp(),
        }
    }

    /// Returns the run status.
    #[must_use]
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Returns all completed artifacts in pipeline order.
    #[must_use]
    pub fn artifacts_in_order(&self) -> Vec<&Artifact> {
        self.artifacts.in_order()
    }

    /// Returns the conversation turns in append order.
    #[must_use]
    pub fn conversation(&self) -> &[Turn] {
        self.conversation.turns()
    }

    /// Exports one artifact's raw text, suitable for file download.
    #[must_use]
    pub fn export_artifact(&self, stage: Stage) -> Option<String> {
        self.artifacts.get(stage).map(|a| a.content.clone())
    }

    /// Exports the code stage's modules as `(file_name, source)` pairs.
    ///
    /// Empty if the code stage has not completed or produced no fenced
    /// code blocks.
    #[must_use]
    pub fn export_code_modules(&self) -> Vec<(String, String)> {
        self.artifacts
            .get(Stage::Code)
            .map(|a| {
                a.code_modules
                    .iter()
                    .map(|m| (m.file_name(), m.code.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the last conversation entry, used by hosting layers as the
    /// failure explanation for a failed run.
    #[must_use]
    pub fn failure_explanation(&self) -> Option<&Turn> {
        match self.status {
            RunStatus::Failed => self.conversation.last(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CodeModule, Role};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_state_is_not_started() {
        let state = ProjectState::new("build an app");
        assert_eq!(state.status(), RunStatus::NotStarted);
        assert_eq!(state.current_stage, Some(Stage::Requirements));
        assert!(state.artifacts.is_empty());
        assert!(state.conversation.is_empty());
    }

    #[test]
    fn test_export_artifact() {
        let mut state = ProjectState::new("text");
        state
            .artifacts
            .put(Artifact::new(Stage::Requirements, "the plan"))
            .unwrap();

        assert_eq!(
            state.export_artifact(Stage::Requirements),
            Some("the plan".to_string())
        );
        assert_eq!(state.export_artifact(Stage::Design), None);
    }

    #[test]
    fn test_export_code_modules() {
        let mut state = ProjectState::new("text");
        let artifact = Artifact::new(Stage::Code, "impl").with_code_modules(vec![
            CodeModule {
                name: "module_1".to_string(),
                language: "python".to_string(),
                code: "print('hi')".to_string(),
            },
            CodeModule {
                name: "module_2".to_string(),
                language: "html".to_string(),
                code: "<p>hi</p>".to_string(),
            },
        ]);
        state.artifacts.put(artifact).unwrap();

        let exports = state.export_code_modules();
        assert_eq!(exports.len(), 2);
        assert_eq!(exports[0].0, "module_1.py");
        assert_eq!(exports[1].0, "module_2.html");
    }

    #[test]
    fn test_failure_explanation_only_when_failed() {
        let mut state = ProjectState::new("text");
        state
            .conversation
            .append(Turn::new(Role::Designer, Stage::Design, "gateway down"));

        assert!(state.failure_explanation().is_none());

        state.status = RunStatus::Failed;
        assert_eq!(state.failure_explanation().unwrap().text, "gateway down");
    }
}
