//! Index lifecycle error types.

use thiserror::Error;

/// Errors that can occur while checking for or creating an index.
///
/// A creation rejection after the benign concurrent-creation race has been
/// ruled out is fatal for the current write and must propagate.
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    /// The search engine rejected the index or template definition.
    #[error("index creation rejected for `{index}`: {reason}")]
    CreationRejected { index: String, reason: String },

    /// Failed to reach the search engine.
    #[error("connection error: {0}")]
    Connection(String),

    /// The operation did not complete within its configured timeout.
    #[error("timed out during {operation}")]
    Timeout { operation: &'static str },
}

impl IndexError {
    /// Create a creation-rejected error.
    pub fn rejected(index: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CreationRejected {
            index: index.into(),
            reason: reason.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a timeout error for the named operation.
    pub fn timeout(operation: &'static str) -> Self {
        Self::Timeout { operation }
    }
}
