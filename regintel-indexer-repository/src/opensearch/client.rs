//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts, IndicesPutTemplateParts},
    IndexParts, OpenSearch,
};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, error, info};
use url::Url;

use crate::config::SearchClientConfig;
use crate::errors::{IndexError, WriteError};
use crate::interfaces::SearchEngineClient;
use crate::opensearch::index_config;
use regintel_indexer_shared::CanonicalDocument;

/// Run an index-lifecycle request under its configured timeout.
///
/// An elapsed timeout is reported as that operation's failure; transport
/// errors map to connection errors.
async fn bounded_index_op<T, F>(
    duration: Duration,
    operation: &'static str,
    request: F,
) -> Result<T, IndexError>
where
    F: Future<Output = Result<T, opensearch::Error>>,
{
    timeout(duration, request)
        .await
        .map_err(|_| IndexError::timeout(operation))?
        .map_err(|e| IndexError::connection(e.to_string()))
}

/// Run a document-write request under its configured timeout.
async fn bounded_write_op<T, F>(duration: Duration, request: F) -> Result<T, WriteError>
where
    F: Future<Output = Result<T, opensearch::Error>>,
{
    timeout(duration, request)
        .await
        .map_err(|_| WriteError::Timeout)?
        .map_err(|e| WriteError::connection(e.to_string()))
}

/// OpenSearch-backed search engine client.
///
/// The underlying transport holds a connection pool and is safe for
/// concurrent use; one instance is constructed at process start and shared
/// across all ingestion workers.
///
/// # Example
///
/// ```ignore
/// let config = SearchClientConfig::default();
/// let client = OpenSearchClient::new("http://localhost:9200", config)?;
/// client.put_index_template().await?;
/// client.ensure_index("reg_intel_fda_2023_01").await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    config: SearchClientConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    pub fn new(url: &str, config: SearchClientConfig) -> Result<Self, IndexError> {
        let parsed_url = Url::parse(url).map_err(|e| IndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| IndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    async fn index_exists(&self, name: &str) -> Result<bool, IndexError> {
        let indices = self.client.indices();
        let names = [name];
        let request = indices.exists(IndicesExistsParts::Index(&names)).send();

        let response =
            bounded_index_op(self.config.exists_timeout, "index-exists", request).await?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(IndexError::connection(format!(
                "unexpected status {} from existence check for `{}`",
                status, name
            ))),
        }
    }

    async fn create_index(&self, name: &str) -> Result<(), IndexError> {
        let indices = self.client.indices();
        let request = indices
            .create(IndicesCreateParts::Index(name))
            .body(index_config::index_body())
            .send();

        let response =
            bounded_index_op(self.config.create_timeout, "index-create", request).await?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(IndexError::rejected(
                name,
                format!("status {}: {}", status, error_body),
            ));
        }

        info!(index = %name, "Created index");
        Ok(())
    }

    async fn put_index_template(&self) -> Result<(), IndexError> {
        let indices = self.client.indices();
        let request = indices
            .put_template(IndicesPutTemplateParts::Name(index_config::TEMPLATE_NAME))
            .body(index_config::index_template())
            .send();

        let response =
            bounded_index_op(self.config.create_timeout, "template-install", request).await?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(IndexError::rejected(
                index_config::TEMPLATE_NAME,
                format!("status {}: {}", status, error_body),
            ));
        }

        info!(template = index_config::TEMPLATE_NAME, "Installed index template");
        Ok(())
    }

    async fn upsert_document(
        &self,
        index: &str,
        document: &CanonicalDocument,
    ) -> Result<(), WriteError> {
        let body =
            serde_json::to_value(document).map_err(|e| WriteError::serialization(e.to_string()))?;

        // Index-by-id: full-document replace, never a partial merge.
        let request = self
            .client
            .index(IndexParts::IndexId(index, &document.id))
            .body(body)
            .send();

        let response = bounded_write_op(self.config.write_timeout, request).await?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(
                index = %index,
                id = %document.id,
                status = %status,
                body = %error_body,
                "Upsert request failed"
            );
            return Err(WriteError::rejected(
                index,
                &document.id,
                format!("status {}: {}", status, error_body),
            ));
        }

        debug!(index = %index, id = %document.id, "Document upserted");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, IndexError> {
        let cluster = self.client.cluster();
        let request = cluster.health(ClusterHealthParts::None).send();

        let response =
            bounded_index_op(self.config.exists_timeout, "health-check", request).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| IndexError::connection(e.to_string()))?;

        let status = body["status"].as_str().unwrap_or("red");
        Ok(status == "green" || status == "yellow")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    #[tokio::test(start_paused = true)]
    async fn test_bounded_index_op_times_out() {
        let hung = pending::<Result<(), opensearch::Error>>();

        let err = bounded_index_op(Duration::from_secs(5), "index-create", hung)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IndexError::Timeout {
                operation: "index-create"
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_write_op_times_out() {
        let hung = pending::<Result<(), opensearch::Error>>();

        let err = bounded_write_op(Duration::from_secs(30), hung)
            .await
            .unwrap_err();

        assert!(matches!(err, WriteError::Timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_index_op_passes_result_through() {
        let immediate = async { Ok::<_, opensearch::Error>(42) };

        let value = bounded_index_op(Duration::from_secs(5), "index-exists", immediate)
            .await
            .unwrap();

        assert_eq!(value, 42);
    }
}
