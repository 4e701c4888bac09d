//! PDF processing layer
//!
//! Page extraction and annotation run on qpdf; rasterization runs on PDFium.

mod page;
mod render;

pub use page::{extract_page, HighlightStyle, SinglePageDocument};
pub use render::RasterConfig;

use crate::error::{Error, Result};
use crate::format::OutputFormat;

/// Rectangle `(x0, y0, x1, y1)` in page coordinate space.
///
/// No ordering between the corner pairs is enforced; the region is taken
/// exactly as given by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Reject non-finite coordinates. NaN and infinities have no stable
    /// textual form, so they can neither key an artifact nor be written
    /// into an annotation rectangle.
    pub fn validate(&self) -> Result<()> {
        let coords = [self.x0, self.y0, self.x1, self.y1];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidRegion {
                reason: format!(
                    "non-finite coordinate in ({}, {}, {}, {})",
                    self.x0, self.y0, self.x1, self.y1
                ),
            });
        }
        Ok(())
    }
}

/// Serialize a single-page document into bytes for the requested format.
///
/// Does not mutate its input. Raster output renders annotations, so a
/// highlighted region survives the WEBP and SVG encodings.
pub fn encode(
    doc: &SinglePageDocument,
    format: OutputFormat,
    raster: &RasterConfig,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Pdf => doc.write_pdf(),
        OutputFormat::Webp => {
            let pdf_bytes = doc.write_pdf()?;
            render::encode_webp(&pdf_bytes, raster)
        }
        OutputFormat::Svg => {
            let pdf_bytes = doc.write_pdf()?;
            render::encode_svg(&pdf_bytes, raster)
        }
    }
}
