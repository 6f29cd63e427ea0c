//! Canonical document written to the search index.
//!
//! The field set and names here are a durable contract: existing indices and
//! the queries running against them depend on them, so changes require a new
//! index and a reindex, never an in-place edit.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format recorded when the source metadata does not supply one.
pub const DEFAULT_FORMAT: &str = "pdf";

/// A single regulatory document record in its indexed shape.
///
/// Exactly one of `body_text` / `body_nested` is populated, depending on
/// whether the source artifact was free text or structured JSON. `id` is the
/// upsert key: re-ingesting the same id replaces the prior version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalDocument {
    pub id: String,
    pub name: String,
    pub title: String,
    pub drug_name: String,
    pub source_url: String,
    pub format: String,
    pub date_created: String,
    pub date_updated: String,
    pub active_substance: String,
    pub strength: String,
    pub data_source: String,
    pub year_of_authorization: String,
    pub license_holder: String,
    pub route_of_administration: String,
    pub submission_date_for_initial_approval: String,
    pub approval_status: String,
    pub document_type: String,
    /// Arbitrary passthrough metadata, indexed as a nested object.
    pub meta_nested: Value,
    /// Analyzed free text body; empty for structured artifacts.
    pub body_text: String,
    /// Structured body content; absent for plain-text artifacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_nested: Option<Value>,
}

/// Current processing time in the timestamp format the `date_created`
/// mapping expects (second precision, no offset).
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}
