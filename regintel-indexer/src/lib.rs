//! # Regintel Indexer
//!
//! Main library for the regulatory intelligence search indexer.
//!
//! This crate provides the entry point and configuration for running the
//! ingestion gateway against a live OpenSearch cluster.

pub mod config;

pub use config::Dependencies;

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Index lifecycle error.
    #[error("Index error: {0}")]
    IndexError(#[from] regintel_indexer_repository::IndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
