//! Document ingestion boundary.
//!
//! Converts an uploaded document into the plain text that seeds the
//! pipeline. Extraction failure means the run never starts.

use crate::errors::ExtractionError;
use async_trait::async_trait;

/// Converts document bytes into plain text.
#[async_trait]
pub trait DocumentIngestor: Send + Sync {
    /// Extracts text from a document.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError` for unsupported or corrupt input.
    async fn extract_text(&self, document_bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Ingestor for plain UTF-8 text documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextIngestor;

impl PlainTextIngestor {
    /// Creates a new plain-text ingestor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentIngestor for PlainTextIngestor {
    async fn extract_text(&self, document_bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = std::str::from_utf8(document_bytes)
            .map_err(|e| ExtractionError::new(format!("document is not valid UTF-8: {e}")))?;

        if text.trim().is_empty() {
            return Err(ExtractionError::new("document contains no text"));
        }

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extracts_utf8_text() {
        let ingestor = PlainTextIngestor::new();
        let text = ingestor.extract_text(b"Build a todo app.").await.unwrap();
        assert_eq!(text, "Build a todo app.");
    }

    #[tokio::test]
    async fn test_rejects_invalid_utf8() {
        let ingestor = PlainTextIngestor::new();
        let err = ingestor.extract_text(&[0xff, 0xfe, 0x00]).await.unwrap_err();
        assert!(err.message.contains("UTF-8"));
    }

    #[tokio::test]
    async fn test_rejects_empty_document() {
        let ingestor = PlainTextIngestor::new();
        assert!(ingestor.extract_text(b"  \n\t ").await.is_err());
        assert!(ingestor.extract_text(b"").await.is_err());
    }
}
