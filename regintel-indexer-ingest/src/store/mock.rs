//! Mock content store for testing and local development.
//!
//! The `MockContentStore` can be pre-populated with (bucket, key) → bytes
//! mappings, allowing tests to run without network access. It also counts
//! fetches so tests can assert that dry-run requests never touch the store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::store::{ContentStore, StoreError};

/// Mock content store that returns pre-configured object data.
pub struct MockContentStore {
    objects: RwLock<HashMap<(String, String), Vec<u8>>>,
    fetch_count: AtomicUsize,
}

impl MockContentStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            fetch_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock store pre-populated with the given objects.
    pub fn with_objects(objects: Vec<(String, String, Vec<u8>)>) -> Self {
        let store = Self::new();
        for (bucket, key, bytes) in objects {
            store.register(&bucket, &key, bytes);
        }
        store
    }

    /// Register content to be returned for a bucket/key pair.
    pub fn register(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.objects
            .write()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), bytes);
    }

    /// Number of `get` calls made against this store.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

impl Default for MockContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for MockContentStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.objects
            .read()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::not_found(bucket, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_get() {
        let store = MockContentStore::new();
        store.register("bucket", "enrich/x.txt", b"some text".to_vec());

        let bytes = store.get("bucket", "enrich/x.txt").await.unwrap();
        assert_eq!(bytes, b"some text");
        assert_eq!(store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_store_not_found() {
        let store = MockContentStore::new();

        let result = store.get("bucket", "missing.txt").await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }
}
