//! Single-page extraction and region highlighting via qpdf

use crate::error::{Error, Result};
use crate::pdf::BoundingBox;
use qpdf::{QPdf, QPdfArray, QPdfDictionary};

/// Fixed styling applied to highlighted regions.
///
/// Passed explicitly into [`SinglePageDocument::highlight`] rather than
/// read from module globals, so callers can see exactly what a rendition
/// was generated with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    /// Interior color in fractional RGB, each component in `0.0..=1.0`
    pub fill: [f32; 3],
    /// Rendered opacity in `0.0..=1.0`
    pub opacity: f32,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            fill: [1.0, 1.0, 0.0],
            opacity: 0.5,
        }
    }
}

/// An owned, standalone single-page PDF document.
///
/// The handle owns the underlying native qpdf document; dropping it
/// releases the document on every exit path, including when highlighting
/// or encoding fails partway through a pipeline.
pub struct SinglePageDocument {
    doc: QPdf,
}

/// Map qpdf crate errors to our error types
fn map_qpdf_error(e: qpdf::QPdfError) -> Error {
    Error::Qpdf {
        reason: e.to_string(),
    }
}

/// Copy one page of `source` into a fresh standalone document.
///
/// The page keeps its vector content, fonts and images (no rasterization)
/// and becomes page 0 of the new document.
pub fn extract_page(source: &[u8], page: u32) -> Result<SinglePageDocument> {
    if source.len() < 4 || &source[0..4] != b"%PDF" {
        return Err(Error::MalformedSource {
            reason: "Not a valid PDF file".to_string(),
        });
    }

    let source_doc = QPdf::read_from_memory(source).map_err(|e| Error::MalformedSource {
        reason: e.to_string(),
    })?;
    let total = source_doc.get_num_pages().map_err(map_qpdf_error)?;

    if page >= total {
        return Err(Error::PageOutOfRange { page, total });
    }

    let dest = QPdf::empty();
    let src_page = source_doc
        .get_page(page)
        .ok_or(Error::PageOutOfRange { page, total })?;
    let copied = dest.copy_from_foreign(&src_page);
    dest.add_page(&copied, false).map_err(map_qpdf_error)?;

    Ok(SinglePageDocument { doc: dest })
}

impl SinglePageDocument {
    /// Overlay a translucent rectangle annotation at `bbox` on page 0.
    ///
    /// Mutates the document in place. Calling this more than once stacks
    /// additional annotations rather than replacing the prior one.
    pub fn highlight(&mut self, bbox: BoundingBox, style: &HighlightStyle) -> Result<()> {
        bbox.validate()?;

        let page = self.doc.get_page(0).ok_or(Error::Qpdf {
            reason: "single-page document has no page 0".to_string(),
        })?;
        let page_dict = QPdfDictionary::from(page);

        let annotation = self
            .doc
            .parse_object(&format!(
                "<< /Type /Annot /Subtype /Square /Rect [ {} {} {} {} ] \
                 /IC [ {} {} {} ] /CA {} /F 4 >>",
                bbox.x0,
                bbox.y0,
                bbox.x1,
                bbox.y1,
                style.fill[0],
                style.fill[1],
                style.fill[2],
                style.opacity,
            ))
            .map_err(map_qpdf_error)?;

        let annots = match page_dict.get("/Annots") {
            Some(existing) => existing,
            None => {
                let fresh = self.doc.parse_object("[ ]").map_err(map_qpdf_error)?;
                page_dict.set("/Annots", &fresh);
                fresh
            }
        };
        let annots = QPdfArray::from(annots);
        annots.push(&annotation);

        Ok(())
    }

    /// Lossless full serialization (vector content and annotations preserved).
    pub fn write_pdf(&self) -> Result<Vec<u8>> {
        let mut writer = self.doc.writer();
        writer.preserve_encryption(false);
        writer.write_to_memory().map_err(map_qpdf_error)
    }
}
