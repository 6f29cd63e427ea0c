//! Index schema registry: template and per-index mapping definitions.
//!
//! Everything in this module is pure data. The field types, analyzers, and
//! tokenization behavior defined here are a durable contract with every
//! index already created from them: changing an analyzed field means a new
//! index and a full reindex, so template and mapping are versioned together
//! and never mutated in place.

use serde_json::{json, Value};

/// Prefix of every routine ingestion index.
pub const INDEX_PREFIX: &str = "reg_intel";

/// Name the template is installed under.
pub const TEMPLATE_NAME: &str = "reg_intel_template";

/// Index name patterns the template applies to.
pub const INDEX_PATTERNS: [&str; 2] = ["reg_intel_*", "regint*"];

const NUMBER_OF_SHARDS: u32 = 1;
const NUMBER_OF_REPLICAS: u32 = 0;

/// Domain term-equivalence groups consumed by the synonym filter at
/// index-creation time. Runtime writes never re-apply synonym logic; this is
/// index-time analysis performed by the search engine.
const SYNONYMS: [&str; 9] = [
    "negative, negation, negated",
    "oncology, cancer, tumor",
    "study, studies, study:there, trial, trials",
    "drug, drugs",
    "approve, approved, approval",
    "single arm, single-arm",
    "priority review, priority reviews",
    "prime designated => priority medicines",
    "review, reviews",
];

fn synonym_filter() -> Value {
    json!({
        "type": "synonym",
        "synonyms": SYNONYMS
    })
}

fn synonym_analyzer() -> Value {
    json!({
        "type": "custom",
        "tokenizer": "standard",
        "filter": ["synonym_filter"]
    })
}

/// Template applied to any index matching [`INDEX_PATTERNS`]: shared
/// shard/replica defaults, the synonym analyzer, and the reduced field set
/// that every matched index carries.
pub fn index_template() -> Value {
    json!({
        "index_patterns": INDEX_PATTERNS,
        "settings": {
            "number_of_shards": NUMBER_OF_SHARDS,
            "number_of_replicas": NUMBER_OF_REPLICAS,
            "index": {
                "analysis": {
                    "filter": {
                        "synonym_filter": synonym_filter()
                    },
                    "analyzer": {
                        "synonym_analyzer": synonym_analyzer()
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "id": { "type": "text" },
                "format": { "type": "text" },
                "name": { "type": "text" },
                "title": { "type": "text" },
                "drug_name": { "type": "text" },
                "source_url": { "type": "text" },
                "body_text": {
                    "type": "text",
                    "term_vector": "with_positions_offsets",
                    "analyzer": "synonym_analyzer"
                },
                "meta_nested": { "type": "nested" },
                "date_created": { "type": "date" },
                "date_updated": { "type": "date" }
            }
        }
    })
}

/// Full creation body for a single index: settings with the autocomplete
/// edge-n-gram and synonym analysis chain, and an explicit mapping for every
/// canonical document field.
pub fn index_body() -> Value {
    json!({
        "settings": {
            "number_of_shards": NUMBER_OF_SHARDS,
            "number_of_replicas": NUMBER_OF_REPLICAS,
            "analysis": {
                "filter": {
                    "autocomplete_filter": {
                        "type": "edge_ngram",
                        "min_gram": 1,
                        "max_gram": 20
                    },
                    "synonym_filter": synonym_filter()
                },
                "analyzer": {
                    "autocomplete": {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": ["lowercase", "autocomplete_filter"]
                    },
                    "synonym_analyzer": synonym_analyzer()
                }
            }
        },
        "mappings": {
            "properties": {
                "id": { "type": "text" },
                "format": { "type": "keyword", "index": true },
                "name": { "type": "keyword", "index": true },
                "title": { "type": "text", "analyzer": "standard" },
                "drug_name": { "type": "text", "analyzer": "standard" },
                "active_substance": { "type": "text", "analyzer": "standard" },
                "strength": { "type": "text", "analyzer": "standard" },
                "data_source": { "type": "keyword", "index": true },
                "license_holder": { "type": "text", "analyzer": "standard" },
                "year_of_authorization": { "type": "date" },
                "route_of_administration": { "type": "text", "analyzer": "standard" },
                "submission_date_for_initial_approval": { "type": "date" },
                "approval_type": { "type": "keyword", "index": true },
                "document_type": { "type": "keyword", "index": true },
                "approval_status": { "type": "keyword", "index": true },
                "body_text": {
                    "type": "text",
                    "term_vector": "with_positions_offsets",
                    "analyzer": "synonym_analyzer"
                },
                "body_nested": { "type": "nested" },
                "meta_nested": { "type": "nested" },
                "source_url": { "type": "text", "analyzer": "standard" },
                "date_created": { "type": "date" },
                "date_updated": { "type": "date" },
                "attachment.content": {
                    "type": "text",
                    "analyzer": "english",
                    "term_vector": "with_positions_offsets",
                    "store": true
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_structure() {
        let template = index_template();

        assert_eq!(template["index_patterns"][0], "reg_intel_*");
        assert_eq!(template["settings"]["number_of_shards"], 1);
        assert_eq!(template["settings"]["number_of_replicas"], 0);

        let filter = &template["settings"]["index"]["analysis"]["filter"]["synonym_filter"];
        assert_eq!(filter["type"], "synonym");
        assert_eq!(filter["synonyms"].as_array().unwrap().len(), SYNONYMS.len());

        assert_eq!(
            template["mappings"]["properties"]["body_text"]["analyzer"],
            "synonym_analyzer"
        );
    }

    #[test]
    fn test_index_body_analyzers() {
        let body = index_body();
        let analysis = &body["settings"]["analysis"];

        assert_eq!(analysis["filter"]["autocomplete_filter"]["type"], "edge_ngram");
        assert_eq!(analysis["filter"]["autocomplete_filter"]["min_gram"], 1);
        assert_eq!(analysis["filter"]["autocomplete_filter"]["max_gram"], 20);
        assert_eq!(
            analysis["analyzer"]["autocomplete"]["filter"][0],
            "lowercase"
        );
        assert_eq!(
            analysis["analyzer"]["synonym_analyzer"]["filter"][0],
            "synonym_filter"
        );
    }

    #[test]
    fn test_index_body_field_mappings() {
        let body = index_body();
        let props = &body["mappings"]["properties"];

        // keyword fields used for filtering
        for field in ["format", "name", "data_source", "approval_status", "document_type"] {
            assert_eq!(props[field]["type"], "keyword", "field {field}");
        }

        // date fields
        for field in [
            "date_created",
            "date_updated",
            "year_of_authorization",
            "submission_date_for_initial_approval",
        ] {
            assert_eq!(props[field]["type"], "date", "field {field}");
        }

        // nested bodies
        assert_eq!(props["body_nested"]["type"], "nested");
        assert_eq!(props["meta_nested"]["type"], "nested");

        // analyzed free text with term vectors for highlighting
        assert_eq!(props["body_text"]["type"], "text");
        assert_eq!(props["body_text"]["term_vector"], "with_positions_offsets");
        assert_eq!(props["body_text"]["analyzer"], "synonym_analyzer");
    }

    #[test]
    fn test_synonym_groups_present_in_both_definitions() {
        for value in [index_template(), index_body()] {
            let synonyms = value
                .pointer("/settings/index/analysis/filter/synonym_filter/synonyms")
                .or_else(|| value.pointer("/settings/analysis/filter/synonym_filter/synonyms"))
                .and_then(Value::as_array)
                .unwrap();
            assert!(synonyms.contains(&json!("oncology, cancer, tumor")));
        }
    }
}
