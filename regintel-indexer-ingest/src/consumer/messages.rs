//! Inbound event payload definitions.
//!
//! Events arrive as JSON envelopes produced by the upstream enrichment
//! pipeline: a record id plus a detail block whose first metadata record
//! carries the data source, the artifact location, and the document
//! metadata. The envelope nesting is upstream's wire contract and is
//! preserved as-is.

use serde::Deserialize;

use crate::errors::IngestError;
use regintel_indexer_shared::{ContentLocation, IngestionRequest, RecordMetadata};

/// One inbound ingestion event.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestEvent {
    /// Stable record id; becomes the document upsert key.
    pub id: String,
    pub detail: EventDetail,
}

/// Detail block of the event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDetail {
    /// Metadata records; routine events carry exactly one.
    pub metadata: Vec<RecordMetadata>,
}

impl TryFrom<IngestEvent> for IngestionRequest {
    type Error = IngestError;

    fn try_from(event: IngestEvent) -> Result<Self, Self::Error> {
        let metadata = event
            .detail
            .metadata
            .into_iter()
            .next()
            .ok_or_else(|| IngestError::MissingField("metadata".to_string()))?;

        let data_source = metadata
            .data_source
            .clone()
            .ok_or_else(|| IngestError::MissingField("data_source".to_string()))?;

        let location_uri = metadata
            .enrich_in_filename
            .clone()
            .ok_or_else(|| IngestError::MissingField("enrich_in_filename".to_string()))?;

        let content_location = ContentLocation::parse(&location_uri).ok_or_else(|| {
            IngestError::unexpected(format!("unparseable content location `{}`", location_uri))
        })?;

        Ok(IngestionRequest {
            record_id: event.id,
            data_source,
            content_location,
            explicit_index_name: metadata.index_name.clone(),
            dry_run: metadata.test,
            metadata,
        })
    }
}
