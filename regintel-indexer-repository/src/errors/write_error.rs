//! Document write error types.

use thiserror::Error;

/// Errors that can occur while upserting a document.
#[derive(Debug, Clone, Error)]
pub enum WriteError {
    /// The search engine rejected the document.
    #[error("write rejected for document `{id}` in `{index}`: {reason}")]
    Rejected {
        index: String,
        id: String,
        reason: String,
    },

    /// Failed to reach the search engine.
    #[error("connection error: {0}")]
    Connection(String),

    /// The write did not complete within its configured timeout.
    #[error("timed out during document write")]
    Timeout,

    /// The document could not be serialized for the wire.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl WriteError {
    /// Create a rejected-write error.
    pub fn rejected(
        index: impl Into<String>,
        id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Rejected {
            index: index.into(),
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}
