//! Source content model and the extraction collaborator seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PipelineError;

/// A unit of extracted source material.
///
/// Segments are produced by an external extraction stage and are never
/// mutated afterwards; the outline builder only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSegment {
    /// Extracted text of this segment.
    pub text: String,
    /// Source page or position (0-based, as reported by the extractor).
    pub page: u32,
    /// Optional provenance tag (e.g., the storage URL of the source file).
    pub source: Option<String>,
}

impl ContentSegment {
    /// Creates a segment with no provenance tag.
    #[must_use]
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self { text: text.into(), page, source: None }
    }

    /// Attaches a provenance tag.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// True when the segment carries no usable text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The external extraction service.
///
/// Supplies the ordered segments of a document. Extraction itself (PDF, text,
/// image OCR) lives outside this crate; the pipeline only consumes the
/// resulting sequence.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Returns the ordered segments for the given document.
    ///
    /// # Errors
    /// Returns a `PipelineError::Source` if extraction fails.
    async fn segments(&self, document_id: Uuid) -> Result<Vec<ContentSegment>, PipelineError>;
}
