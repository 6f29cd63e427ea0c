//! Ingestion request types.
//!
//! An [`IngestionRequest`] is the normalized form of one inbound enrichment
//! event: where the raw artifact lives, which upstream source produced it,
//! and the typed metadata record that becomes most of the indexed document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the raw artifact content is interpreted, derived from the file
/// extension of the content location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Plain UTF-8 text, indexed as analyzed free text.
    Text,
    /// JSON, indexed as a nested structured body.
    Structured,
}

impl ContentKind {
    /// Map a file extension to a content kind. Unknown extensions return
    /// `None`; the assembler rejects those records.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "txt" => Some(Self::Text),
            "json" => Some(Self::Structured),
            _ => None,
        }
    }
}

/// Parsed object-storage location, e.g. `s3://bucket/enrich/out/x.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLocation {
    pub bucket: String,
    pub key: String,
}

impl ContentLocation {
    /// Parse a `scheme://bucket/key` URI. The key may contain slashes.
    pub fn parse(uri: &str) -> Option<Self> {
        let (_, rest) = uri.split_once("://")?;
        let (bucket, key) = rest.split_once('/')?;
        if bucket.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// File extension of the key, if any.
    pub fn extension(&self) -> Option<&str> {
        let name = self.key.rsplit('/').next()?;
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}

/// Typed metadata record carried by the inbound event.
///
/// All fields are optional at the wire level; the assembler decides which
/// are required and fails with the missing key's name. Keys outside the
/// known set are preserved in `extra` and travel into `meta_nested`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_substance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_authorization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_holder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_of_administration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_date_for_initial_approval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Location of the enrichment artifact to index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrich_in_filename: Option<String>,
    /// Explicit target index, overriding the time-partitioned default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    /// Marks a synthetic test event; switches the gateway into dry-run mode.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub test: bool,
    /// Passthrough for arbitrary extension metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One normalized ingestion request, processed independently of all others.
#[derive(Debug, Clone)]
pub struct IngestionRequest {
    /// Stable record id, used as the upsert key.
    pub record_id: String,
    /// Upstream source system, e.g. "FDA" or "EMA".
    pub data_source: String,
    /// Where the raw artifact lives in the content store.
    pub content_location: ContentLocation,
    pub metadata: RecordMetadata,
    /// Explicit target index name; always wins over the computed one.
    pub explicit_index_name: Option<String>,
    /// Dry-run requests skip content retrieval entirely.
    pub dry_run: bool,
}

impl IngestionRequest {
    /// Content kind derived from the artifact's file extension, if the
    /// extension is one this system knows how to load.
    pub fn content_kind(&self) -> Option<ContentKind> {
        self.content_location
            .extension()
            .and_then(ContentKind::from_extension)
    }
}
