//! Role agents: one per pipeline role.
//!
//! A role agent maps a stage context to one artifact plus a narrative via a
//! single gateway call. It never reads or mutates project state; it is a
//! pure function of the context it is given, testable with a mock gateway
//! and no executor.

mod context;
mod templates;

pub use context::StageContext;
pub use templates::{expected_markers, prompt_for};

use crate::core::{Artifact, CodeModule, Role, Stage};
use crate::errors::{StageError, ValidationError};
use crate::gateway::ModelGateway;
use regex::Regex;
use std::sync::Arc;
use std::sync::OnceLock;
use tracing::debug;

/// The result of one successful agent invocation.
#[derive(Debug, Clone)]
pub struct AgentOutput {
    /// The validated artifact for the agent's stage.
    pub artifact: Artifact,
    /// The raw model text, recorded as the role's conversation turn.
    pub narrative: String,
}

/// One specialized role wrapping a prompt template and a gateway handle.
pub struct RoleAgent {
    role: Role,
    gateway: Arc<dyn ModelGateway>,
}

impl RoleAgent {
    /// Creates an agent for a role.
    #[must_use]
    pub fn new(role: Role, gateway: Arc<dyn ModelGateway>) -> Self {
        Self { role, gateway }
    }

    /// Returns the agent's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Produces the stage artifact and narrative for a context.
    ///
    /// # Errors
    ///
    /// Gateway failures propagate unchanged with their transient/fatal
    /// classification. A malformed or empty response is reported as a
    /// validation error so the executor can log it distinctly.
    pub async fn produce(&self, ctx: &StageContext) -> Result<AgentOutput, StageError> {
        let stage = self.role.stage();
        let prompt = prompt_for(self.role, ctx);

        debug!(role = %self.role, stage = %stage, prompt_len = prompt.len(), "Invoking role agent");
        let response = self.gateway.generate(&prompt).await?;

        validate_response(stage, &response)?;

        let mut artifact = Artifact::new(stage, response.trim());
        if stage == Stage::Code {
            artifact = artifact.with_code_modules(extract_code_modules(&response));
        }

        Ok(AgentOutput {
            artifact,
            narrative: response.trim().to_string(),
        })
    }
}

impl std::fmt::Debug for RoleAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleAgent").field("role", &self.role).finish()
    }
}

/// Checks that a response is classifiable as the stage's artifact shape:
/// non-empty text carrying at least one of the stage's expected section
/// markers.
fn validate_response(stage: Stage, response: &str) -> Result<(), ValidationError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(stage, "empty response"));
    }

    let lower = trimmed.to_lowercase();
    let markers = expected_markers(stage);
    if !markers.iter().any(|m| lower.contains(m)) {
        return Err(ValidationError::new(
            stage,
            format!("response carries none of the expected section markers {markers:?}"),
        ));
    }

    Ok(())
}

#[allow(clippy::expect_used)]
fn code_fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"```(\w+)?\n((?s).*?)```").expect("code fence pattern is valid")
    })
}

/// Extracts fenced code blocks from a developer response.
///
/// Each block becomes a `CodeModule` named `module_N` in order of appearance;
/// a missing language tag defaults to "text".
#[must_use]
pub fn extract_code_modules(response: &str) -> Vec<CodeModule> {
    code_fence_regex()
        .captures_iter(response)
        .enumerate()
        .map(|(i, caps)| CodeModule {
            name: format!("module_{}", i + 1),
            language: caps
                .get(1)
                .map_or_else(|| "text".to_string(), |m| m.as_str().trim().to_string()),
            code: caps
                .get(2)
                .map_or_else(String::new, |m| m.as_str().trim().to_string()),
        })
        .collect()
}
