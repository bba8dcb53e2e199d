//! End-to-end scenario tests for full pipeline runs.

#[cfg(test)]
mod tests {
    use crate::agents::StageContext;
    use crate::cancellation::CancellationToken;
    use crate::core::{Role, RunStatus, Stage};
    use crate::gateway::{MockGateway, ModelGateway, ScriptedReply};
    use crate::ingest::PlainTextIngestor;
    use crate::pipeline::{PipelineExecutor, RetryConfig};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn todo_script() -> Vec<ScriptedReply> {
        vec![
            ScriptedReply::text(
                "1. Project scope: a todo list app\n\
                 2. Main features to implement: add, remove, complete tasks\n\
                 6. Next steps: hand off to design",
            ),
            ScriptedReply::text(
                "1. Wireframes description: a single list screen for the todo list app,\n\
                 derived from the project scope above\n\
                 2. UI components needed: task list, add field, complete checkbox",
            ),
            ScriptedReply::text(
                "1. Architecture overview: single-page app\n\
                 4. Sample code for key components\n\
                 ```javascript\n\
                 function addTask(t) { tasks.push(t); }\n\
                 ```",
            ),
            ScriptedReply::text(
                "1. Test plan overview\n\
                 2. Test scenarios: add a task, remove a task, complete a task",
            ),
            ScriptedReply::text(
                "1. Introduction to the product: the todo list app\n\
                 2. Key features and functionality: add/remove/complete",
            ),
        ]
    }

    #[tokio::test]
    async fn test_todo_app_end_to_end() {
        let gateway = Arc::new(MockGateway::new(todo_script()));
        let executor =
            PipelineExecutor::new(gateway).with_retry_config(RetryConfig::immediate(3));

        let state = executor
            .run("Build a todo list app with add/remove/complete tasks.")
            .await;

        assert_eq!(state.status(), RunStatus::Completed);

        let requirements = state.export_artifact(Stage::Requirements).unwrap();
        for word in ["todo", "add", "remove", "complete"] {
            assert!(
                requirements.to_lowercase().contains(word),
                "requirements artifact missing '{word}'"
            );
        }

        // The design artifact references the requirements content, and every
        // stage's artifact lands after its predecessor.
        let design = state.export_artifact(Stage::Design).unwrap();
        assert!(design.contains("project scope"));

        let artifacts = state.artifacts_in_order();
        assert_eq!(artifacts.len(), 5);
        let stages: Vec<Stage> = artifacts.iter().map(|a| a.stage).collect();
        assert_eq!(stages, Stage::ORDER.to_vec());
        for pair in artifacts.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }

        // Conversation: one turn per stage, monotonic append.
        assert_eq!(state.conversation().len(), 5);
        assert_eq!(state.conversation()[0].role, Role::ProjectManager);
        assert_eq!(state.conversation()[4].role, Role::Presenter);

        // The developer's fenced code exports as a module.
        let code_exports = state.export_code_modules();
        assert_eq!(code_exports.len(), 1);
        assert_eq!(code_exports[0].0, "module_1.js");
    }

    #[tokio::test]
    async fn test_designer_fatal_failure_scenario() {
        let gateway = Arc::new(MockGateway::new(vec![
            ScriptedReply::text("1. Project scope: planning done"),
            ScriptedReply::fatal("auth failure"),
        ]));
        let executor = PipelineExecutor::new(Arc::clone(&gateway) as Arc<dyn ModelGateway>)
            .with_retry_config(RetryConfig::immediate(3));

        let state = executor.run("Build something.").await;

        assert_eq!(state.status(), RunStatus::Failed);

        // Only the requirements artifact exists.
        assert_eq!(state.artifacts.len(), 1);
        assert!(state.artifacts.contains(Stage::Requirements));
        assert!(!state.artifacts.contains(Stage::Design));

        // Developer, tester, and presenter were never invoked: exactly two
        // gateway calls happened (manager success + designer fatal).
        assert_eq!(gateway.call_count(), 2);

        // Conversation: the manager's turn plus a failure record for the
        // designer attempt.
        let turns = state.conversation();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::ProjectManager);
        assert_eq!(turns[1].role, Role::Designer);
        assert!(turns[1].text.contains("auth failure"));
        assert_eq!(state.failure_explanation().unwrap().stage, Stage::Design);
    }

    #[tokio::test]
    async fn test_stage_context_determinism_for_fixed_prefix() {
        let gateway = Arc::new(MockGateway::new(todo_script()));
        let executor =
            PipelineExecutor::new(gateway).with_retry_config(RetryConfig::immediate(3));

        let state = executor.run("Build a todo list app.").await;

        for stage in Stage::ORDER {
            let a = StageContext::build(&state, stage);
            let b = StageContext::build(&state, stage);
            assert_eq!(a.rendered(), b.rendered());
        }
    }

    #[tokio::test]
    async fn test_ingested_document_seeds_the_run() {
        let gateway = Arc::new(MockGateway::new(todo_script()));
        let executor =
            PipelineExecutor::new(gateway).with_retry_config(RetryConfig::immediate(3));

        let state = executor
            .run_document(
                b"Build a todo list app with add/remove/complete tasks.",
                &PlainTextIngestor::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            state.initial_text,
            "Build a todo list app with add/remove/complete tasks."
        );
        assert_eq!(state.status(), RunStatus::Completed);
    }

    #[tokio::test]
    async fn test_extraction_failure_means_no_run() {
        let gateway = Arc::new(MockGateway::new(todo_script()));
        let executor = PipelineExecutor::new(Arc::clone(&gateway) as Arc<dyn ModelGateway>)
            .with_retry_config(RetryConfig::immediate(3));

        let result = executor
            .run_document(&[0xff, 0xfe], &PlainTextIngestor::new())
            .await;

        // No ProjectState exists for a failed extraction; the run never
        // started and the gateway was never called.
        assert!(result.is_err());
        assert_eq!(gateway.call_count(), 0);
    }

    /// Delegates to an inner mock and cancels the token while the first
    /// call is in flight.
    struct CancellingGateway {
        inner: MockGateway,
        token: Arc<CancellationToken>,
    }

    #[async_trait::async_trait]
    impl crate::gateway::ModelGateway for CancellingGateway {
        async fn generate(&self, prompt: &str) -> Result<String, crate::errors::GatewayError> {
            self.token.cancel("observer requested stop");
            self.inner.generate(prompt).await
        }
    }

    #[tokio::test]
    async fn test_cancellation_between_stages() {
        // Cancellation lands during the first gateway call. The call in
        // flight is not interrupted, so the requirements stage completes;
        // the boundary check before design stops the run.
        let token = Arc::new(CancellationToken::new());
        let gateway = Arc::new(CancellingGateway {
            inner: MockGateway::new(todo_script()),
            token: Arc::clone(&token),
        });
        let executor = PipelineExecutor::new(gateway)
            .with_retry_config(RetryConfig::immediate(3));

        let state = executor
            .run_with_token("Build a todo list app.", &token)
            .await;

        assert_eq!(state.status(), RunStatus::Failed);
        assert_eq!(state.artifacts.len(), 1);
        assert!(state.artifacts.contains(Stage::Requirements));
        assert!(state
            .failure_explanation()
            .unwrap()
            .text
            .contains("observer requested stop"));
    }
}
