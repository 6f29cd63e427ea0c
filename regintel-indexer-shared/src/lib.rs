//! # Regintel Indexer Shared
//!
//! Shared data structures for the regulatory intelligence search indexer:
//! the canonical document shape written to the search engine, and the
//! ingestion request types assembled from inbound enrichment events.

pub mod document;
pub mod request;

pub use document::{current_timestamp, CanonicalDocument, DEFAULT_FORMAT};
pub use request::{ContentKind, ContentLocation, IngestionRequest, RecordMetadata};
