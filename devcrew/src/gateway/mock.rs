//! Scripted mock gateway for testing.

use crate::errors::GatewayError;
use crate::gateway::ModelGateway;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One scripted reply from the mock gateway.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Return this text.
    Text(String),
    /// Fail with a transient error.
    Transient(String),
    /// Fail with a fatal error.
    Fatal(String),
}

impl ScriptedReply {
    /// Convenience constructor for a text reply.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Convenience constructor for a transient failure.
    #[must_use]
    pub fn transient(s: impl Into<String>) -> Self {
        Self::Transient(s.into())
    }

    /// Convenience constructor for a fatal failure.
    #[must_use]
    pub fn fatal(s: impl Into<String>) -> Self {
        Self::Fatal(s.into())
    }
}

/// A `ModelGateway` that replays a fixed script of replies.
///
/// Each `generate` call consumes the next scripted reply; once the script is
/// exhausted the last reply repeats. Tracks call counts so tests can assert
/// exactly how many attempts were made.
#[derive(Debug, Default)]
pub struct MockGateway {
    script: Mutex<Vec<ScriptedReply>>,
    cursor: AtomicUsize,
    call_count: AtomicUsize,
}

impl MockGateway {
    /// Creates a mock that replays the given script.
    #[must_use]
    pub fn new(script: Vec<ScriptedReply>) -> Self {
        Self {
            script: Mutex::new(script),
            cursor: AtomicUsize::new(0),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Creates a mock that always succeeds with the given text.
    #[must_use]
    pub fn always(text: impl Into<String>) -> Self {
        Self::new(vec![ScriptedReply::text(text)])
    }

    /// Creates a mock that fails every call with a transient error.
    #[must_use]
    pub fn always_transient(message: impl Into<String>) -> Self {
        Self::new(vec![ScriptedReply::transient(message)])
    }

    /// Creates a mock that fails every call with a fatal error.
    #[must_use]
    pub fn always_fatal(message: impl Into<String>) -> Self {
        Self::new(vec![ScriptedReply::fatal(message)])
    }

    /// Returns how many times `generate` has been called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Resets the script cursor and call counter.
    pub fn reset(&self) {
        self.cursor.store(0, Ordering::SeqCst);
        self.call_count.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let script = self.script.lock();
        if script.is_empty() {
            return Err(GatewayError::fatal("mock gateway has no script"));
        }
        let index = self
            .cursor
            .fetch_add(1, Ordering::SeqCst)
            .min(script.len() - 1);

        match &script[index] {
            ScriptedReply::Text(text) => Ok(text.clone()),
            ScriptedReply::Transient(message) => Err(GatewayError::transient(message.clone())),
            ScriptedReply::Fatal(message) => Err(GatewayError::fatal(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_replays_in_order() {
        let mock = MockGateway::new(vec![
            ScriptedReply::transient("hiccup"),
            ScriptedReply::text("recovered"),
        ]);

        assert!(mock.generate("p").await.is_err());
        assert_eq!(mock.generate("p").await.unwrap(), "recovered");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_last_reply_repeats() {
        let mock = MockGateway::always("same answer");

        for _ in 0..3 {
            assert_eq!(mock.generate("p").await.unwrap(), "same answer");
        }
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_always_fatal() {
        let mock = MockGateway::always_fatal("bad key");
        let err = mock.generate("p").await.unwrap_err();
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_reset() {
        let mock = MockGateway::new(vec![
            ScriptedReply::text("first"),
            ScriptedReply::text("second"),
        ]);
        let _ = mock.generate("p").await;
        mock.reset();

        assert_eq!(mock.call_count(), 0);
        assert_eq!(mock.generate("p").await.unwrap(), "first");
    }
}
