//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch,
//! Elasticsearch, mocks for testing).

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::errors::{IndexError, WriteError};
use regintel_indexer_shared::CanonicalDocument;

/// Abstract interface for the search engine operations this system uses:
/// index lifecycle management and document upserts.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single client instance is shared
/// across concurrently processed ingestion requests.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check whether an index with the given name exists.
    async fn index_exists(&self, name: &str) -> Result<bool, IndexError>;

    /// Create the named index from the registered schema.
    ///
    /// Fails if the index already exists; callers wanting idempotence use
    /// [`ensure_index`](Self::ensure_index).
    async fn create_index(&self, name: &str) -> Result<(), IndexError>;

    /// Ensure the named index exists, creating it from the registered schema
    /// if absent.
    ///
    /// Idempotent and safe to call on every write. Two workers racing to
    /// create the same index is benign: the loser's creation failure is
    /// treated as success once existence is reconfirmed. Any other creation
    /// failure propagates.
    async fn ensure_index(&self, name: &str) -> Result<(), IndexError> {
        if self.index_exists(name).await? {
            debug!(index = %name, "Index already exists, skipping creation");
            return Ok(());
        }

        match self.create_index(name).await {
            Ok(()) => Ok(()),
            Err(creation_error) => {
                // Another writer may have created the index between our
                // existence check and the create call. Reconfirm before
                // treating the failure as fatal.
                match self.index_exists(name).await {
                    Ok(true) => {
                        warn!(
                            index = %name,
                            error = %creation_error,
                            "Index creation lost a concurrent race; index exists now"
                        );
                        Ok(())
                    }
                    _ => {
                        error!(index = %name, error = %creation_error, "Index creation failed");
                        Err(creation_error)
                    }
                }
            }
        }
    }

    /// Install the index template that covers all indices matching the
    /// configured name pattern. Called once at startup.
    async fn put_index_template(&self) -> Result<(), IndexError>;

    /// Upsert a document into the named index, keyed by `document.id`.
    ///
    /// Full-document replace semantics: if a document with the same id
    /// exists it is replaced wholesale, never partially merged.
    async fn upsert_document(
        &self,
        index: &str,
        document: &CanonicalDocument,
    ) -> Result<(), WriteError>;

    /// Check if the search engine is healthy and reachable.
    async fn health_check(&self) -> Result<bool, IndexError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Stub client scripting the exists/create pair so the ensure sequence
    /// itself can be driven through every branch.
    struct StubClient {
        /// Answers for successive `index_exists` calls.
        exists_answers: Mutex<Vec<Result<bool, IndexError>>>,
        create_result: Result<(), IndexError>,
        exists_calls: AtomicUsize,
        create_calls: AtomicUsize,
    }

    impl StubClient {
        fn new(
            exists_answers: Vec<Result<bool, IndexError>>,
            create_result: Result<(), IndexError>,
        ) -> Self {
            Self {
                exists_answers: Mutex::new(exists_answers),
                create_result,
                exists_calls: AtomicUsize::new(0),
                create_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SearchEngineClient for StubClient {
        async fn index_exists(&self, _name: &str) -> Result<bool, IndexError> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            let mut answers = self.exists_answers.lock().unwrap();
            if answers.is_empty() {
                return Ok(false);
            }
            answers.remove(0)
        }

        async fn create_index(&self, _name: &str) -> Result<(), IndexError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.create_result.clone()
        }

        async fn put_index_template(&self) -> Result<(), IndexError> {
            Ok(())
        }

        async fn upsert_document(
            &self,
            _index: &str,
            _document: &CanonicalDocument,
        ) -> Result<(), WriteError> {
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, IndexError> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_ensure_index_skips_creation_when_present() {
        let client = StubClient::new(vec![Ok(true)], Ok(()));

        client.ensure_index("reg_intel_fda_2023_01").await.unwrap();

        assert_eq!(client.exists_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ensure_index_creates_when_absent() {
        let client = StubClient::new(vec![Ok(false)], Ok(()));

        client.ensure_index("reg_intel_fda_2023_01").await.unwrap();

        assert_eq!(client.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ensure_index_tolerates_lost_creation_race() {
        // Absent at first check, creation rejected, but a concurrent writer
        // got there first: the follow-up check confirms existence and the
        // failure is swallowed.
        let client = StubClient::new(
            vec![Ok(false), Ok(true)],
            Err(IndexError::rejected("reg_intel_fda_2023_01", "already exists")),
        );

        client.ensure_index("reg_intel_fda_2023_01").await.unwrap();

        assert_eq!(client.exists_calls.load(Ordering::SeqCst), 2);
        assert_eq!(client.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ensure_index_propagates_genuine_creation_failure() {
        // Creation rejected and the index is still absent afterwards: the
        // original error must surface, not be swallowed.
        let client = StubClient::new(
            vec![Ok(false), Ok(false)],
            Err(IndexError::rejected("reg_intel_fda_2023_01", "schema rejected")),
        );

        let err = client.ensure_index("reg_intel_fda_2023_01").await.unwrap_err();

        assert!(matches!(
            err,
            IndexError::CreationRejected { ref reason, .. } if reason == "schema rejected"
        ));
        assert_eq!(client.exists_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_ensure_index_propagates_failure_when_recheck_errors() {
        // If the reconfirming existence check itself fails, the creation
        // error is still the one reported.
        let client = StubClient::new(
            vec![Ok(false), Err(IndexError::connection("lost"))],
            Err(IndexError::rejected("reg_intel_fda_2023_01", "rejected")),
        );

        let err = client.ensure_index("reg_intel_fda_2023_01").await.unwrap_err();
        assert!(matches!(err, IndexError::CreationRejected { .. }));
    }

    #[tokio::test]
    async fn test_ensure_index_idempotent_across_calls() {
        let client = StubClient::new(vec![Ok(false), Ok(true), Ok(true)], Ok(()));

        for _ in 0..3 {
            client.ensure_index("reg_intel_fda_2023_01").await.unwrap();
        }

        assert_eq!(client.create_calls.load(Ordering::SeqCst), 1);
    }
}
