//! # Devcrew
//!
//! A staged multi-agent development pipeline: five specialized roles turn an
//! unstructured requirements document into a sequence of development
//! artifacts.
//!
//! The pipeline is strictly sequential (requirements → design → code →
//! test_plan → presentation) because each stage's input is the accumulated
//! output of every previous stage. The crate provides:
//!
//! - **Stage state machine**: [`pipeline::PipelineExecutor`] drives a run
//!   from `not_started` to `completed` or `failed` with an explicit,
//!   configurable retry policy.
//! - **Shared project state**: [`state::ProjectState`] threads write-once
//!   artifacts and an append-only conversation log through the stages.
//! - **Role agents**: [`agents::RoleAgent`] maps a deterministic stage
//!   context to one artifact plus a narrative via a single model call.
//! - **Gateway boundary**: [`gateway::ModelGateway`] with transient/fatal
//!   error classification, an OpenAI-compatible client, and a scripted mock.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use devcrew::prelude::*;
//! use std::sync::Arc;
//!
//! let gateway = Arc::new(OpenAiGateway::new(OpenAiConfig::new(
//!     "https://api.openai.com/v1",
//!     std::env::var("OPENAI_API_KEY")?,
//! ))?);
//!
//! let executor = PipelineExecutor::new(gateway);
//! let state = executor.run("Build a todo list app.").await;
//! assert_eq!(state.status(), RunStatus::Completed);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod agents;
pub mod cancellation;
pub mod core;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod ingest;
pub mod observability;
pub mod pipeline;
pub mod state;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::agents::{AgentOutput, RoleAgent, StageContext};
    pub use crate::cancellation::CancellationToken;
    pub use crate::core::{Artifact, CodeModule, Role, RunStatus, Stage, Turn};
    pub use crate::errors::{
        ArtifactConflictError, ExtractionError, GatewayError, StageError, ValidationError,
    };
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::gateway::{
        MockGateway, ModelGateway, OpenAiConfig, OpenAiGateway, ScriptedReply,
    };
    pub use crate::ingest::{DocumentIngestor, PlainTextIngestor};
    pub use crate::pipeline::{BackoffStrategy, JitterStrategy, PipelineExecutor, RetryConfig};
    pub use crate::state::{ArtifactStore, ConversationLog, ProjectState};
}
