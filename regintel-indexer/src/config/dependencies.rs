//! Dependency initialization and wiring for the regintel indexer.
//!
//! All configuration is resolved once here at startup; the constructed
//! clients are injected into the gateway rather than looked up from ambient
//! globals anywhere downstream.

use std::env;
use std::sync::Arc;
use tracing::info;

use crate::IndexingError;
use regintel_indexer_ingest::store::ContentSource;
use regintel_indexer_ingest::IngestionGateway;
use regintel_indexer_repository::{OpenSearchClient, SearchClientConfig, SearchEngineClient};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default content store endpoint.
const DEFAULT_CONTENT_STORE_URL: &str = "http://localhost:9000";

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured gateway ready to process events.
    pub gateway: IngestionGateway,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `CONTENT_STORE_URL`: object store HTTP endpoint (default: http://localhost:9000)
    /// - `CONTENT_STORE_MOCK`: set to use an empty in-memory store instead
    ///
    /// Verifies cluster health and installs the index template before
    /// returning, so the first write never races template installation.
    pub async fn new() -> Result<Self, IndexingError> {
        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let content_store_url =
            env::var("CONTENT_STORE_URL").unwrap_or_else(|_| DEFAULT_CONTENT_STORE_URL.to_string());
        let mock_store = env::var("CONTENT_STORE_MOCK").is_ok();

        info!(
            opensearch_url = %opensearch_url,
            content_store_url = %content_store_url,
            mock_store = mock_store,
            "Initializing dependencies"
        );

        let search_client =
            OpenSearchClient::new(&opensearch_url, SearchClientConfig::default())
                .map_err(|e| {
                    IndexingError::config(format!("Failed to create OpenSearch client: {}", e))
                })?;

        let healthy = search_client.health_check().await.map_err(|e| {
            IndexingError::config(format!("OpenSearch health check failed: {}", e))
        })?;

        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        search_client.put_index_template().await?;

        let content_source = if mock_store {
            ContentSource::mock(Vec::new())
        } else {
            ContentSource::live(content_store_url)
        };

        let gateway = IngestionGateway::new(
            Arc::new(search_client),
            Arc::from(content_source.into_store()),
        );

        Ok(Self { gateway })
    }
}
