//! Page rasterization and vector export via PDFium

use crate::error::{Error, Result};
use base64::Engine;
use pdfium_render::prelude::*;

const POINTS_PER_INCH: f32 = 72.0;

/// Rasterization settings for image output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterConfig {
    /// Rendering resolution in dots per inch, applied on both axes
    pub dpi: u32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self { dpi: 300 }
    }
}

/// Get PDFium instance (creates new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    // Try to bind to system library or use static linking
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Render page 0 of `pdf_bytes` at the configured DPI.
/// Annotations are rendered into the bitmap.
fn render_page(pdf_bytes: &[u8], config: &RasterConfig) -> Result<(image::DynamicImage, f32, f32)> {
    let pdfium = create_pdfium()?;

    let document = pdfium
        .load_pdf_from_byte_slice(pdf_bytes, None)
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to open rendition for rendering: {}", e),
        })?;

    let pages = document.pages();
    let page = pages.get(0).map_err(|e| Error::Pdfium {
        reason: format!("Failed to get page 0: {}", e),
    })?;

    let width_points = page.width().value;
    let height_points = page.height().value;

    let scale = config.dpi as f32 / POINTS_PER_INCH;
    let render_config = PdfRenderConfig::new()
        .scale_page_by_factor(scale)
        .render_annotations(true);

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to render page: {}", e),
        })?;

    Ok((bitmap.as_image(), width_points, height_points))
}

/// Encode page 0 as a WEBP image rendered at the configured DPI.
pub(crate) fn encode_webp(pdf_bytes: &[u8], config: &RasterConfig) -> Result<Vec<u8>> {
    let (image, _, _) = render_page(pdf_bytes, config)?;

    let mut out = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut out),
            image::ImageFormat::WebP,
        )
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to encode page as WEBP: {}", e),
        })?;

    Ok(out)
}

/// Export page 0 as an SVG document sized in page points.
///
/// PDFium has no vector export, so this is not a true vector conversion:
/// the SVG embeds the page rendition rasterized at the configured DPI, and
/// only the outer markup scales with the page's point size. Text and line
/// art in the output have raster fidelity; consumers needing genuinely
/// scalable glyphs and paths should request the PDF rendition instead.
pub(crate) fn encode_svg(pdf_bytes: &[u8], config: &RasterConfig) -> Result<Vec<u8>> {
    let (image, width_points, height_points) = render_page(pdf_bytes, config)?;

    let mut png = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to encode page as PNG: {}", e),
        })?;

    let data = base64::engine::general_purpose::STANDARD.encode(&png);
    let svg = format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            "\n",
            r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
            r#"xmlns:xlink="http://www.w3.org/1999/xlink" "#,
            r#"width="{w}pt" height="{h}pt" viewBox="0 0 {w} {h}">"#,
            r#"<image width="{w}" height="{h}" preserveAspectRatio="none" "#,
            r#"xlink:href="data:image/png;base64,{data}"/>"#,
            r#"</svg>"#,
            "\n",
        ),
        w = width_points,
        h = height_points,
        data = data,
    );

    Ok(svg.into_bytes())
}
