//! The stage state machine driving a pipeline run.

use crate::agents::{RoleAgent, StageContext};
use crate::cancellation::CancellationToken;
use crate::core::{RunStatus, Stage, Turn};
use crate::errors::StageError;
use crate::events::{EventSink, NoOpEventSink};
use crate::gateway::ModelGateway;
use crate::pipeline::RetryConfig;
use crate::state::ProjectState;
use std::sync::Arc;
use tracing::{info, warn};

/// Drives `ProjectState` from `not_started` to `completed` or `failed`, one
/// stage at a time, in the fixed order.
///
/// The executor is the only writer of project state during a run. Each stage
/// gets a context built from all prior artifacts plus the full conversation,
/// and its output is validated before being stored. Failure policy: transient
/// gateway errors and validation errors are retried with identical context up
/// to the configured bound; a fatal gateway error, or an exhausted budget,
/// fails the whole run and no later stage executes.
pub struct PipelineExecutor {
    gateway: Arc<dyn ModelGateway>,
    retry: RetryConfig,
    events: Arc<dyn EventSink>,
}

impl PipelineExecutor {
    /// Creates an executor over a gateway with the default retry policy.
    #[must_use]
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            retry: RetryConfig::default(),
            events: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Runs the full pipeline over extracted requirements text.
    ///
    /// Always returns the final project state: `completed` when every stage
    /// produced an artifact, `failed` otherwise, with partial progress
    /// retained for inspection.
    pub async fn run(&self, initial_text: impl Into<String>) -> ProjectState {
        self.run_with_token(initial_text, &CancellationToken::new())
            .await
    }

    /// Extracts text from a document and runs the full pipeline over it.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError` when the document cannot be converted to
    /// text; in that case the run never starts and no state exists.
    pub async fn run_document(
        &self,
        document_bytes: &[u8],
        ingestor: &dyn crate::ingest::DocumentIngestor,
    ) -> Result<ProjectState, crate::errors::ExtractionError> {
        let text = ingestor.extract_text(document_bytes).await?;
        Ok(self.run(text).await)
    }

    /// Runs the pipeline, checking the token at stage boundaries.
    ///
    /// A gateway call in flight is not interrupted; cancellation takes effect
    /// before the next stage begins.
    pub async fn run_with_token(
        &self,
        initial_text: impl Into<String>,
        token: &CancellationToken,
    ) -> ProjectState {
        let mut state = ProjectState::new(initial_text);
        state.status = RunStatus::Running;
        info!(run_id = %state.run_id, "Pipeline run started");

        for stage in Stage::ORDER {
            if token.is_cancelled() {
                let reason = token.reason().unwrap_or_else(|| "cancelled".to_string());
                self.fail_run(&mut state, stage, format!("Run cancelled: {reason}"))
                    .await;
                self.emit("pipeline.cancelled", &state, stage, None).await;
                return state;
            }

            state.current_stage = Some(stage);
            if !self.execute_stage(&mut state, stage).await {
                return state;
            }
            state.current_stage = stage.next();
        }

        state.status = RunStatus::Completed;
        self.events
            .emit(
                "pipeline.completed",
                Some(serde_json::json!({ "run_id": state.run_id })),
            )
            .await;
        info!(run_id = %state.run_id, "Pipeline run completed");
        state
    }

    /// Executes one stage with the retry policy. Returns true on success;
    /// false means the run was marked failed.
    async fn execute_stage(&self, state: &mut ProjectState, stage: Stage) -> bool {
        let agent = RoleAgent::new(stage.owner(), Arc::clone(&self.gateway));
        self.emit("stage.started", state, stage, None).await;

        let mut attempt = 0;
        loop {
            attempt += 1;
            // Prior artifacts are unchanged across attempts, so the rebuilt
            // context is identical each time.
            let ctx = StageContext::build(state, stage);

            match agent.produce(&ctx).await {
                Ok(output) => {
                    if let Err(conflict) = state.artifacts.put(output.artifact) {
                        self.fail_run(state, stage, conflict.to_string()).await;
                        return false;
                    }
                    state
                        .conversation
                        .append(Turn::new(stage.owner(), stage, output.narrative));
                    self.emit(
                        "stage.completed",
                        state,
                        stage,
                        Some(serde_json::json!({ "attempt": attempt })),
                    )
                    .await;
                    info!(run_id = %state.run_id, stage = %stage, attempt, "Stage completed");
                    return true;
                }
                Err(error) => {
                    let retryable = error.is_retryable() && attempt < self.retry.max_attempts;
                    // Validation failures are logged apart from gateway
                    // hiccups even though both follow the same retry policy.
                    let event_type = match &error {
                        StageError::Validation(_) => "stage.validation_failed",
                        StageError::Gateway(_) => "stage.gateway_failed",
                    };
                    self.emit(
                        event_type,
                        state,
                        stage,
                        Some(serde_json::json!({
                            "attempt": attempt,
                            "error": error.to_string(),
                            "will_retry": retryable,
                        })),
                    )
                    .await;

                    if retryable {
                        let delay = self.retry.delay_for(attempt);
                        warn!(
                            run_id = %state.run_id,
                            stage = %stage,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %error,
                            "Stage attempt failed, retrying"
                        );
                        self.emit(
                            "stage.retrying",
                            state,
                            stage,
                            Some(serde_json::json!({ "attempt": attempt })),
                        )
                        .await;
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    self.fail_run(
                        state,
                        stage,
                        format!("Stage failed after {attempt} attempt(s): {error}"),
                    )
                    .await;
                    return false;
                }
            }
        }
    }

    /// Marks the run failed, recording the explanation as the last
    /// conversation turn. Already-stored artifacts stay in place.
    async fn fail_run(&self, state: &mut ProjectState, stage: Stage, explanation: String) {
        warn!(run_id = %state.run_id, stage = %stage, explanation = %explanation, "Pipeline run failed");
        state
            .conversation
            .append(Turn::new(stage.owner(), stage, explanation.clone()));
        state.status = RunStatus::Failed;
        self.emit(
            "pipeline.failed",
            state,
            stage,
            Some(serde_json::json!({ "explanation": explanation })),
        )
        .await;
    }

    async fn emit(
        &self,
        event_type: &str,
        state: &ProjectState,
        stage: Stage,
        extra: Option<serde_json::Value>,
    ) {
        let mut data = serde_json::json!({
            "run_id": state.run_id,
            "stage": stage.to_string(),
            "role": stage.owner().to_string(),
        });
        if let (Some(obj), Some(serde_json::Value::Object(extra_obj))) =
            (data.as_object_mut(), extra)
        {
            obj.extend(extra_obj);
        }
        self.events.emit(event_type, Some(data)).await;
    }
}

impl std::fmt::Debug for PipelineExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineExecutor")
            .field("retry", &self.retry)
            .finish()
    }
}
