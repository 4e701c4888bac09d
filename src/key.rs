//! Deterministic artifact key derivation
//!
//! The key layout is a stable contract: cached renditions written by one
//! deployment must stay addressable by the next. Page artifacts, snippet
//! artifacts and the source object live in disjoint namespaces under the
//! document id:
//!
//! ```text
//! {id}/source.pdf
//! {id}/pages/{page}.{ext}
//! {id}/snippets/{page}/{x0}_{y0}_{x1}_{y1}.{ext}
//! ```
//!
//! Derivation is pure: identical request fields always map to the same key,
//! and any differing field maps to a different key.

use crate::error::Result;
use crate::format::OutputFormat;
use crate::pdf::BoundingBox;

/// Canonical path of the source document object within its bucket.
pub fn source_key(document_id: &str) -> String {
    format!("{}/source.pdf", document_id)
}

/// Key of a cached single-page rendition.
pub fn page_key(document_id: &str, page: u32, format: OutputFormat) -> String {
    format!("{}/pages/{}.{}", document_id, page, format.extension())
}

/// Key of a cached highlighted-snippet rendition.
///
/// Coordinates are formatted with Rust's shortest-roundtrip float `Display`,
/// which is deterministic for every finite `f64`. Non-finite coordinates are
/// rejected before any key is produced.
pub fn snippet_key(
    document_id: &str,
    page: u32,
    bbox: &BoundingBox,
    format: OutputFormat,
) -> Result<String> {
    bbox.validate()?;
    Ok(format!(
        "{}/snippets/{}/{}_{}_{}_{}.{}",
        document_id,
        page,
        bbox.x0,
        bbox.y0,
        bbox.x1,
        bbox.y1,
        format.extension()
    ))
}
