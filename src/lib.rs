//! Rendition Cache Library
//!
//! This crate provides an on-demand cache of derived PDF renditions for a
//! document-viewing backend:
//! - `resolve_page`: a single extracted page in PDF, WEBP or SVG form
//! - `resolve_snippet`: an extracted page with a highlighted region
//!
//! Renditions are generated lazily, stored under deterministic keys in the
//! same object-store bucket as the source document, and handed back as
//! time-limited presigned URLs.

pub mod cache;
pub mod error;
pub mod format;
pub mod key;
pub mod pdf;
pub mod store;

pub use cache::ArtifactCache;
pub use error::{Error, Result};
pub use format::OutputFormat;
pub use pdf::{BoundingBox, HighlightStyle, RasterConfig, SinglePageDocument};
pub use store::{
    AccessDescriptor, DocumentCatalog, DocumentLocation, MemoryStore, ObjectStore, StaticCatalog,
};
