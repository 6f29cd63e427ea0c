//! Error types for the regintel indexer ingest.
//!
//! Stage-local errors are converted into [`IngestError`] at the gateway, so
//! a failure always reports which stage of the per-request pipeline it
//! belongs to. Nothing here is retried internally; redelivery is the event
//! transport's responsibility.

use regintel_indexer_repository::{IndexError, WriteError};
use thiserror::Error;

use crate::store::StoreError;

/// Stages of the per-request ingestion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Received,
    IndexResolved,
    IndexReady,
    ContentFetched,
    Assembled,
    Written,
}

impl IngestStage {
    /// Stable lowercase label for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::IndexResolved => "index_resolved",
            Self::IndexReady => "index_ready",
            Self::ContentFetched => "content_fetched",
            Self::Assembled => "assembled",
            Self::Written => "written",
        }
    }
}

/// Errors reading or interpreting the raw artifact content.
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    /// The artifact's file extension maps to no known content kind.
    #[error("unsupported content kind for extension `{0}`")]
    UnsupportedContentKind(String),

    /// The artifact bytes are not valid UTF-8.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The artifact claimed to be structured but did not parse.
    #[error("malformed structured content: {0}")]
    MalformedStructured(String),
}

/// Errors assembling a canonical document from a request.
#[derive(Debug, Clone, Error)]
pub enum AssembleError {
    /// The raw content could not be interpreted.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// A required metadata key was absent.
    #[error("missing required metadata field `{0}`")]
    MissingField(String),
}

/// Errors that can occur while processing one ingestion request.
///
/// One bad record never aborts a batch: the gateway converts each failure
/// into a result for that single request and moves on.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The artifact content was unreadable or of an unsupported kind.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// The event metadata was incomplete.
    #[error("missing required metadata field `{0}`")]
    MissingField(String),

    /// Index existence check or creation failed.
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// The document upsert was rejected.
    #[error("write error: {0}")]
    Write(#[from] WriteError),

    /// The content store could not produce the artifact.
    #[error("content store error: {0}")]
    Store(#[from] StoreError),

    /// Anything unclassified, caught at the gateway boundary.
    #[error("ingestion failed: {0}")]
    Unexpected(String),
}

impl IngestError {
    /// Create an unexpected error.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// The pipeline stage this error failed in.
    pub fn stage(&self) -> IngestStage {
        match self {
            Self::Index(_) => IngestStage::IndexReady,
            Self::Store(_) => IngestStage::ContentFetched,
            Self::Content(_) | Self::MissingField(_) => IngestStage::Assembled,
            Self::Write(_) => IngestStage::Written,
            Self::Unexpected(_) => IngestStage::Received,
        }
    }
}

impl From<AssembleError> for IngestError {
    fn from(err: AssembleError) -> Self {
        match err {
            AssembleError::Content(e) => Self::Content(e),
            AssembleError::MissingField(key) => Self::MissingField(key),
        }
    }
}
