//! Model gateway boundary.
//!
//! The pipeline treats the language model as an opaque capability: given a
//! prompt, it returns text or fails with a two-way error classification that
//! the executor's retry policy depends on.

mod mock;
mod openai;

pub use mock::{MockGateway, ScriptedReply};
pub use openai::{OpenAiConfig, OpenAiGateway};

use crate::errors::GatewayError;
use async_trait::async_trait;

/// Sends a prompt to a language model and returns the generated text.
///
/// Implementations must classify failures as transient (safe to retry the
/// identical request) or fatal (not safe to retry). Timeout policy is the
/// implementation's responsibility, surfaced as a transient error on expiry.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Generates text for a prompt.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transient` for rate limits, timeouts, and
    /// connection failures; `GatewayError::Fatal` for auth failures and
    /// malformed requests.
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}
