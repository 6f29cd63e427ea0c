//! Document assembler.
//!
//! Normalizes one ingestion request plus the raw artifact bytes into the
//! canonical document shape required by the index mapping. Pure transform:
//! no I/O, no retained state.

use serde_json::Value;
use tracing::debug;

use crate::errors::{AssembleError, ContentError};
use regintel_indexer_shared::{
    current_timestamp, CanonicalDocument, ContentKind, IngestionRequest, DEFAULT_FORMAT,
};

fn require(value: &Option<String>, key: &str) -> Result<String, AssembleError> {
    value
        .clone()
        .ok_or_else(|| AssembleError::MissingField(key.to_string()))
}

/// Assemble a canonical document from a request and the raw artifact bytes.
///
/// Dispatches on the content kind derived from the artifact's file
/// extension: plain text becomes `body_text`, JSON becomes `body_nested`,
/// anything else is rejected. Either branch fails without a partial
/// document.
pub fn assemble(
    request: &IngestionRequest,
    raw_content: &[u8],
) -> Result<CanonicalDocument, AssembleError> {
    let kind = request.content_kind().ok_or_else(|| {
        ContentError::UnsupportedContentKind(
            request
                .content_location
                .extension()
                .unwrap_or("")
                .to_string(),
        )
    })?;

    let text = std::str::from_utf8(raw_content)
        .map_err(|e| ContentError::InvalidEncoding(e.to_string()))?;

    let (body_text, body_nested) = match kind {
        ContentKind::Text => (text.to_string(), None),
        ContentKind::Structured => {
            let parsed: Value = serde_json::from_str(text)
                .map_err(|e| ContentError::MalformedStructured(e.to_string()))?;
            (String::new(), Some(parsed))
        }
    };

    let metadata = &request.metadata;
    let filename = require(&metadata.filename, "filename")?;

    let document = CanonicalDocument {
        id: request.record_id.clone(),
        name: filename.clone(),
        title: filename,
        drug_name: require(&metadata.drug_name, "drug_name")?,
        source_url: require(&metadata.source_url, "source_url")?,
        format: metadata
            .format
            .clone()
            .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
        // Always processing time, never caller-supplied.
        date_created: current_timestamp(),
        date_updated: require(&metadata.last_updated, "last_updated")?,
        active_substance: require(&metadata.active_substance, "active_substance")?,
        strength: require(&metadata.strength, "strength")?,
        data_source: require(&metadata.data_source, "data_source")?,
        year_of_authorization: require(&metadata.year_of_authorization, "year_of_authorization")?,
        license_holder: require(&metadata.license_holder, "license_holder")?,
        route_of_administration: require(
            &metadata.route_of_administration,
            "route_of_administration",
        )?,
        submission_date_for_initial_approval: require(
            &metadata.submission_date_for_initial_approval,
            "submission_date_for_initial_approval",
        )?,
        // The metadata key is `approval_type` but the indexed field is
        // `approval_status`; existing queries depend on the field name, so
        // the mismatch is kept as-is.
        approval_status: require(&metadata.approval_type, "approval_type")?,
        document_type: require(&metadata.document_type, "document_type")?,
        meta_nested: serde_json::to_value(metadata)
            .map_err(|e| ContentError::MalformedStructured(e.to_string()))?,
        body_text,
        body_nested,
    };

    debug!(id = %document.id, "Assembled canonical document");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regintel_indexer_shared::{ContentLocation, RecordMetadata};
    use serde_json::json;

    fn full_metadata() -> RecordMetadata {
        RecordMetadata {
            filename: Some("x.json".to_string()),
            drug_name: Some("DrugA".to_string()),
            source_url: Some("http://example.com/x".to_string()),
            last_updated: Some("2023-01-01".to_string()),
            active_substance: Some("substance".to_string()),
            strength: Some("10mg".to_string()),
            data_source: Some("FDA".to_string()),
            year_of_authorization: Some("2020".to_string()),
            license_holder: Some("Holder".to_string()),
            route_of_administration: Some("oral".to_string()),
            submission_date_for_initial_approval: Some("2019-06-01".to_string()),
            approval_type: Some("standard".to_string()),
            document_type: Some("label".to_string()),
            ..Default::default()
        }
    }

    fn request(uri: &str) -> IngestionRequest {
        IngestionRequest {
            record_id: "abc123".to_string(),
            data_source: "FDA".to_string(),
            content_location: ContentLocation::parse(uri).unwrap(),
            metadata: full_metadata(),
            explicit_index_name: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_assemble_text() {
        let request = request("s3://bucket/enrich/x.txt");
        let doc = assemble(&request, b"free text body").unwrap();

        assert_eq!(doc.body_text, "free text body");
        assert!(doc.body_nested.is_none());
        assert_eq!(doc.id, "abc123");
    }

    #[test]
    fn test_assemble_structured() {
        let request = request("s3://bucket/enrich/x.json");
        let doc = assemble(&request, br#"{"a": 1}"#).unwrap();

        assert!(doc.body_text.is_empty());
        assert_eq!(doc.body_nested, Some(json!({"a": 1})));
    }

    #[test]
    fn test_assemble_unsupported_extension() {
        let request = request("s3://bucket/enrich/x.bin");
        let err = assemble(&request, b"whatever").unwrap_err();

        assert!(matches!(
            err,
            AssembleError::Content(ContentError::UnsupportedContentKind(ref ext)) if ext == "bin"
        ));
    }

    #[test]
    fn test_assemble_malformed_json() {
        let request = request("s3://bucket/enrich/x.json");
        let err = assemble(&request, b"{not json").unwrap_err();

        assert!(matches!(
            err,
            AssembleError::Content(ContentError::MalformedStructured(_))
        ));
    }

    #[test]
    fn test_assemble_missing_field() {
        let mut request = request("s3://bucket/enrich/x.txt");
        request.metadata.last_updated = None;

        let err = assemble(&request, b"text").unwrap_err();
        assert!(matches!(
            err,
            AssembleError::MissingField(ref key) if key == "last_updated"
        ));
    }

    #[test]
    fn test_assemble_field_mapping() {
        let request = request("s3://bucket/enrich/x.txt");
        let doc = assemble(&request, b"text").unwrap();

        // name and title both come from the filename
        assert_eq!(doc.name, "x.json");
        assert_eq!(doc.title, "x.json");
        // approval_type feeds approval_status; document_type maps straight
        assert_eq!(doc.approval_status, "standard");
        assert_eq!(doc.document_type, "label");
        // date_updated comes from last_updated, date_created is fresh
        assert_eq!(doc.date_updated, "2023-01-01");
        assert!(!doc.date_created.is_empty());
        // default format applies when the caller supplies none
        assert_eq!(doc.format, DEFAULT_FORMAT);
    }

    #[test]
    fn test_assemble_explicit_format_wins() {
        let mut request = request("s3://bucket/enrich/x.txt");
        request.metadata.format = Some("html".to_string());

        let doc = assemble(&request, b"text").unwrap();
        assert_eq!(doc.format, "html");
    }

    #[test]
    fn test_assemble_meta_nested_passthrough() {
        let mut request = request("s3://bucket/enrich/x.txt");
        request
            .metadata
            .extra
            .insert("custom_tag".to_string(), json!("anything"));

        let doc = assemble(&request, b"text").unwrap();
        assert_eq!(doc.meta_nested["custom_tag"], "anything");
        assert_eq!(doc.meta_nested["drug_name"], "DrugA");
    }
}
