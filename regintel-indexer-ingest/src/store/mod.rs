//! Content store collaborator.
//!
//! This module provides:
//! - [`ContentStore`] trait for abstracting artifact retrieval
//! - [`HttpContentStore`] production client that fetches over HTTP
//! - [`MockContentStore`] mock with pre-configured (bucket, key) → bytes
//! - [`ContentSource`] config enum for choosing between mock and live stores
//!
//! ## Usage with ContentSource
//!
//! ```ignore
//! use regintel_indexer_ingest::store::ContentSource;
//!
//! // Development/testing: use mock data
//! let store = ContentSource::mock(vec![
//!     ("bucket".into(), "enrich/x.json".into(), br#"{"a":1}"#.to_vec()),
//! ]).into_store();
//!
//! // Production: use the object-store HTTP endpoint
//! let store = ContentSource::live("https://store.internal").into_store();
//!
//! let bytes = store.get("bucket", "enrich/x.json").await?;
//! ```

mod mock;

pub use mock::MockContentStore;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur fetching an artifact from the content store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No object at the given bucket/key.
    #[error("object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// The store refused access to the object.
    #[error("access denied: {bucket}/{key}")]
    AccessDenied { bucket: String, key: String },

    /// Transport-level failure reaching the store.
    #[error("transport error: {0}")]
    Transport(String),
}

impl StoreError {
    /// Create a not-found error.
    pub fn not_found(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Create an access-denied error.
    pub fn access_denied(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::AccessDenied {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// Trait for fetching raw artifact content from object storage.
///
/// This trait abstracts the store to enable dependency injection and
/// mocking; production code uses [`HttpContentStore`], tests use
/// [`MockContentStore`].
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the raw bytes of one object.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;
}

/// Production content store that fetches objects over HTTP.
pub struct HttpContentStore {
    base_url: String,
    client: ReqwestClient,
}

impl HttpContentStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let url = format!("{}/{}/{}", self.base_url, bucket, key);
        debug!(url = %url, "Fetching artifact content");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        match response.status().as_u16() {
            404 => Err(StoreError::not_found(bucket, key)),
            403 => Err(StoreError::access_denied(bucket, key)),
            status if !(200..300).contains(&status) => Err(StoreError::Transport(format!(
                "unexpected status {} for {}/{}",
                status, bucket, key
            ))),
            _ => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| StoreError::Transport(e.to_string()))?;
                Ok(bytes.to_vec())
            }
        }
    }
}

/// Configuration for the content store source.
///
/// Use this to explicitly choose between mock and live stores at wiring
/// time, rather than branching on ambient environment state deep inside the
/// gateway.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Pre-configured (bucket, key) → bytes mappings; no network access.
    Mock(Vec<(String, String, Vec<u8>)>),

    /// Fetch from a live object-store HTTP endpoint.
    Live { base_url: String },
}

impl ContentSource {
    /// Create a mock content source with the given objects.
    pub fn mock(objects: Vec<(String, String, Vec<u8>)>) -> Self {
        Self::Mock(objects)
    }

    /// Create a live content source with the given base URL.
    pub fn live(base_url: impl Into<String>) -> Self {
        Self::Live {
            base_url: base_url.into(),
        }
    }

    /// Create the appropriate ContentStore implementation.
    pub fn into_store(self) -> Box<dyn ContentStore> {
        match self {
            Self::Mock(objects) => Box::new(MockContentStore::with_objects(objects)),
            Self::Live { base_url } => Box::new(HttpContentStore::new(&base_url)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_source_into_store_mock() {
        let source = ContentSource::mock(vec![(
            "bucket".to_string(),
            "key.txt".to_string(),
            b"hello".to_vec(),
        )]);
        let store = source.into_store();
        assert_eq!(store.get("bucket", "key.txt").await.unwrap(), b"hello");
    }
}
