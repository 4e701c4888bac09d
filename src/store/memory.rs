//! In-memory object store and catalog for tests and local development

use crate::error::{Error, Result};
use crate::store::{AccessDescriptor, DocumentCatalog, DocumentLocation, ObjectStore};
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
struct StoreInner {
    objects: HashMap<(String, String), Vec<u8>>,
    fetches: u64,
    writes: u64,
}

/// In-memory [`ObjectStore`] with fetch/write counters.
///
/// Presigned URLs use a `memory://` scheme and carry a fixed 15-minute
/// expiry; the counters let tests assert which store operations a resolve
/// call actually performed.
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
}

const PRESIGN_TTL_MINUTES: i64 = 15;

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
        }
    }

    /// Seed an object, e.g. a source document, without counting a write.
    pub fn insert(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.inner
            .lock()
            .objects
            .insert((bucket.to_string(), key.to_string()), bytes);
    }

    /// Stored bytes for a key, if present.
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.inner
            .lock()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.inner.lock().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().objects.is_empty()
    }

    /// Number of `get` calls served since construction.
    pub fn fetch_count(&self) -> u64 {
        self.inner.lock().fetches
    }

    /// Number of `put` calls served since construction.
    pub fn write_count(&self) -> u64 {
        self.inner.lock().writes
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for MemoryStore {
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
        Ok(self
            .inner
            .lock()
            .objects
            .contains_key(&(bucket.to_string(), key.to_string())))
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let mut inner = self.inner.lock();
        inner.fetches += 1;
        inner
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| Error::SourceFetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: "no such object".to_string(),
            })
    }

    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.writes += 1;
        inner
            .objects
            .insert((bucket.to_string(), key.to_string()), bytes);
        Ok(())
    }

    async fn presign(&self, bucket: &str, key: &str) -> Result<AccessDescriptor> {
        // Like S3, signing does not check that the object exists.
        let expires_at = Utc::now() + Duration::minutes(PRESIGN_TTL_MINUTES);
        Ok(AccessDescriptor {
            url: format!(
                "memory://{}/{}?expires={}",
                bucket,
                key,
                expires_at.timestamp()
            ),
            expires_at,
        })
    }
}

/// Fixed-map [`DocumentCatalog`].
pub struct StaticCatalog {
    documents: HashMap<String, DocumentLocation>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    pub fn with_document(mut self, id: &str, location: DocumentLocation) -> Self {
        self.documents.insert(id.to_string(), location);
        self
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCatalog for StaticCatalog {
    async fn lookup(&self, document_id: &str) -> Result<DocumentLocation> {
        self.documents
            .get(document_id)
            .cloned()
            .ok_or_else(|| Error::DocumentNotFound {
                id: document_id.to_string(),
            })
    }
}
