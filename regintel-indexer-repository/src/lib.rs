//! # Regintel Indexer Repository
//!
//! This crate provides traits and implementations for interacting with the
//! search engine. It includes the index schema registry, error definitions,
//! the abstract client interface, and a concrete implementation for
//! OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use config::SearchClientConfig;
pub use errors::{IndexError, WriteError};
pub use interfaces::SearchEngineClient;
pub use opensearch::OpenSearchClient;
