//! Object-store and document-catalog contracts
//!
//! The cache core consumes its storage backend and metadata lookup through
//! these narrow traits. Production deployments back them with S3-style
//! clients; [`MemoryStore`] and [`StaticCatalog`] back them for tests and
//! local development.

mod memory;

pub use memory::{MemoryStore, StaticCatalog};

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;

/// Time-limited read URL for a stored object.
///
/// Never persisted; regenerated on every resolve call regardless of whether
/// the underlying artifact was a cache hit or freshly generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDescriptor {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// Storage location of a source document, as resolved by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    /// Bucket holding the source object and all of its cached renditions
    pub bucket: String,
    /// Key of the source PDF within the bucket
    pub source_key: String,
}

/// Blob storage client, S3-shaped.
///
/// Implementations own their retry, timeout and cancellation policy; the
/// cache core calls each operation exactly once per resolve step.
pub trait ObjectStore: Send + Sync {
    fn exists(&self, bucket: &str, key: &str) -> impl Future<Output = Result<bool>> + Send;

    fn get(&self, bucket: &str, key: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;

    fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<()>> + Send;

    fn presign(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl Future<Output = Result<AccessDescriptor>> + Send;
}

/// Document metadata lookup: resolves a document id to its storage location.
pub trait DocumentCatalog: Send + Sync {
    fn lookup(&self, document_id: &str) -> impl Future<Output = Result<DocumentLocation>> + Send;
}
