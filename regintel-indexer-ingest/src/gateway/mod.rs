//! Ingestion gateway.
//!
//! Entry point for one ingestion request: resolve the target index, make
//! sure it exists, fetch the raw artifact, assemble the canonical document,
//! and upsert it. Requests are independent of each other; the gateway holds
//! no per-request state and never retries; redelivery belongs to the event
//! transport.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument};

use crate::assembler;
use crate::consumer::IngestEvent;
use crate::errors::IngestError;
use crate::store::ContentStore;
use regintel_indexer_repository::opensearch::index_config::INDEX_PREFIX;
use regintel_indexer_repository::SearchEngineClient;
use regintel_indexer_shared::{ContentKind, IngestionRequest};

/// Acknowledgement for a successfully written record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReceipt {
    pub record_id: String,
    /// Index the document landed in.
    pub index: String,
}

/// Gateway that orchestrates the ingestion pipeline.
///
/// Both collaborators are shared, concurrency-safe clients injected at
/// construction; the gateway can be cloned cheaply across workers.
#[derive(Clone)]
pub struct IngestionGateway {
    search: Arc<dyn SearchEngineClient>,
    store: Arc<dyn ContentStore>,
}

impl IngestionGateway {
    /// Create a new gateway with the given collaborators.
    pub fn new(search: Arc<dyn SearchEngineClient>, store: Arc<dyn ContentStore>) -> Self {
        Self { search, store }
    }

    /// Resolve the target index name for a request.
    ///
    /// An explicit override on the request always wins; otherwise the name
    /// is time-partitioned from the processing time:
    /// `reg_intel_<data_source_lowercased>_<year>_<month>`.
    pub fn resolve_index_name(request: &IngestionRequest, now: DateTime<Utc>) -> String {
        if let Some(explicit) = &request.explicit_index_name {
            return explicit.clone();
        }
        format!(
            "{}_{}_{}",
            INDEX_PREFIX,
            request.data_source.to_lowercase(),
            now.format("%Y_%m")
        )
    }

    /// Process one ingestion request end to end.
    #[instrument(skip(self, request), fields(record_id = %request.record_id))]
    pub async fn ingest(&self, request: &IngestionRequest) -> Result<IngestReceipt, IngestError> {
        let index = Self::resolve_index_name(request, Utc::now());

        self.search.ensure_index(&index).await?;

        let raw_content = if request.dry_run {
            // Synthetic test events must exercise the same assembly and
            // write contract without touching external storage.
            synthetic_content(request)
        } else {
            self.store
                .get(
                    &request.content_location.bucket,
                    &request.content_location.key,
                )
                .await?
        };

        let document = assembler::assemble(request, &raw_content)?;

        self.search.upsert_document(&index, &document).await?;

        info!(
            record_id = %request.record_id,
            index = %index,
            dry_run = request.dry_run,
            "Document written"
        );

        Ok(IngestReceipt {
            record_id: request.record_id.clone(),
            index,
        })
    }

    /// Boundary wrapper for one raw event payload.
    ///
    /// Parses the envelope, converts it to a request, and runs the
    /// pipeline. Every failure is logged with its stage and record context
    /// and returned as a failed result for this single event only.
    pub async fn process_event(&self, raw_event: &str) -> Result<IngestReceipt, IngestError> {
        let event: IngestEvent = serde_json::from_str(raw_event)
            .map_err(|e| IngestError::unexpected(format!("unparseable event: {}", e)))?;

        let record_id = event.id.clone();
        let request = IngestionRequest::try_from(event)?;

        match self.ingest(&request).await {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                error!(
                    record_id = %record_id,
                    stage = e.stage().as_str(),
                    error = %e,
                    "Ingestion failed"
                );
                Err(e)
            }
        }
    }
}

/// Kind-appropriate placeholder content for dry-run requests.
///
/// The placeholder must be non-empty so the assembled document still
/// carries a populated body for its kind.
fn synthetic_content(request: &IngestionRequest) -> Vec<u8> {
    match request.content_kind() {
        Some(ContentKind::Structured) => b"{}".to_vec(),
        Some(ContentKind::Text) => b"synthetic test event".to_vec(),
        // Unknown extensions get empty bytes; the assembler rejects them
        // the same way it would a real artifact.
        None => Vec::new(),
    }
}
