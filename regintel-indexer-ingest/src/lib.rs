//! # Regintel Indexer Ingest
//!
//! Ingest components for turning upstream enrichment events into indexed
//! regulatory documents.
//!
//! ## Architecture
//!
//! One ingestion request flows through four stages:
//!
//! 1. **Consumer messages**: deserialize the inbound event envelope
//! 2. **Content store**: fetch the raw enrichment artifact (skipped in dry-run)
//! 3. **Assembler**: normalize metadata + raw content into a canonical document
//! 4. **Gateway**: resolve the target index, ensure it exists, and upsert

pub mod assembler;
pub mod consumer;
pub mod errors;
pub mod gateway;
pub mod store;

pub use errors::{AssembleError, ContentError, IngestError, IngestStage};
pub use gateway::{IngestReceipt, IngestionGateway};
