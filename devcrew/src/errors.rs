//! Error taxonomy for the pipeline core.
//!
//! The executor's retry policy hinges on the classification here:
//! transient gateway errors and validation errors are retried up to a bound,
//! fatal gateway errors escalate immediately, and extraction errors mean the
//! run never starts.

use crate::core::Stage;
use thiserror::Error;

/// Failure from the model gateway, classified by whether retrying the
/// identical request could plausibly succeed.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Rate limit, timeout, or connection failure. Safe to retry unchanged.
    #[error("transient gateway error: {message}")]
    Transient {
        /// What went wrong.
        message: String,
    },

    /// Auth failure or malformed request. Not safe to retry.
    #[error("fatal gateway error: {message}")]
    Fatal {
        /// What went wrong.
        message: String,
    },
}

impl GatewayError {
    /// Creates a transient error.
    #[must_use]
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Creates a fatal error.
    #[must_use]
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
        }
    }

    /// Returns true if retrying the identical request could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// The uploaded document could not be converted to text.
///
/// Fatal to the run; surfaced before any stage starts.
#[derive(Debug, Clone, Error)]
#[error("extraction failed: {message}")]
pub struct ExtractionError {
    /// Why extraction failed.
    pub message: String,
}

impl ExtractionError {
    /// Creates a new extraction error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An agent's output did not match the artifact shape expected for its stage.
///
/// Retried like a transient gateway error (the failure may be model-output
/// variance) but logged distinctly.
#[derive(Debug, Clone, Error)]
#[error("validation failed for stage '{stage}': {reason}")]
pub struct ValidationError {
    /// The stage whose output failed validation.
    pub stage: Stage,
    /// Why validation failed.
    pub reason: String,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(stage: Stage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}

/// An artifact was written twice for the same stage.
///
/// The store is write-once per stage; the existing entry is never mutated.
#[derive(Debug, Clone, Error)]
#[error("artifact already stored for stage '{stage}'")]
pub struct ArtifactConflictError {
    /// The stage with an existing artifact.
    pub stage: Stage,
}

impl ArtifactConflictError {
    /// Creates a new conflict error.
    #[must_use]
    pub fn new(stage: Stage) -> Self {
        Self { stage }
    }
}

/// A single stage attempt failed, in a way the retry policy can classify.
#[derive(Debug, Clone, Error)]
pub enum StageError {
    /// The model gateway failed.
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    /// The agent's output failed shape validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl StageError {
    /// Returns true if the retry policy may re-attempt the stage.
    ///
    /// Transient gateway errors and validation errors are retryable; fatal
    /// gateway errors are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Gateway(e) => e.is_transient(),
            Self::Validation(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_classification() {
        assert!(GatewayError::transient("rate limited").is_transient());
        assert!(!GatewayError::fatal("bad api key").is_transient());
    }

    #[test]
    fn test_stage_error_retryability() {
        let transient = StageError::Gateway(GatewayError::transient("timeout"));
        let fatal = StageError::Gateway(GatewayError::fatal("401"));
        let validation =
            StageError::Validation(ValidationError::new(Stage::Design, "empty response"));

        assert!(transient.is_retryable());
        assert!(!fatal.is_retryable());
        assert!(validation.is_retryable());
    }

    #[test]
    fn test_error_messages_name_the_stage() {
        let err = ValidationError::new(Stage::TestPlan, "missing sections");
        assert!(err.to_string().contains("test_plan"));

        let conflict = ArtifactConflictError::new(Stage::Requirements);
        assert!(conflict.to_string().contains("requirements"));
    }
}
