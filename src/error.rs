//! Error types for the rendition cache

use thiserror::Error;

/// Result type alias for the rendition cache
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the rendition cache
#[derive(Error, Debug)]
pub enum Error {
    /// Document id unknown to the catalog
    #[error("Document not found: {id}")]
    DocumentNotFound { id: String },

    /// Source bytes do not parse as a PDF
    #[error("Malformed source document: {reason}")]
    MalformedSource { reason: String },

    /// Page out of range
    #[error("Page {page} out of range (total: {total})")]
    PageOutOfRange { page: u32, total: u32 },

    /// Format outside the supported set
    #[error("Unsupported output format: {format}")]
    UnsupportedFormat { format: String },

    /// Bounding box with non-finite coordinates
    #[error("Invalid region: {reason}")]
    InvalidRegion { reason: String },

    /// Object-store read failure
    #[error("Failed to fetch {bucket}/{key}: {reason}")]
    SourceFetch {
        bucket: String,
        key: String,
        reason: String,
    },

    /// Object-store write failure
    #[error("Failed to store {bucket}/{key}: {reason}")]
    StorageWrite {
        bucket: String,
        key: String,
        reason: String,
    },

    /// URL signing failure
    #[error("Failed to presign {bucket}/{key}: {reason}")]
    Presign {
        bucket: String,
        key: String,
        reason: String,
    },

    /// qpdf error
    #[error("qpdf error: {reason}")]
    Qpdf { reason: String },

    /// PDFium error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },
}

impl Error {
    /// Return a sanitized error message safe to send to clients.
    /// Internal details (bucket names, keys, library errors) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::DocumentNotFound { .. } => "Document not found".to_string(),
            Error::MalformedSource { .. } => "Source document is not a valid PDF".to_string(),
            Error::PageOutOfRange { page, total } => {
                format!("Page {} out of range (total: {})", page, total)
            }
            Error::UnsupportedFormat { format } => {
                format!("Unsupported output format: {}", format)
            }
            Error::InvalidRegion { reason } => format!("Invalid region: {}", reason),
            Error::SourceFetch { .. } => "Failed to fetch source document".to_string(),
            Error::StorageWrite { .. } => "Failed to store rendition".to_string(),
            Error::Presign { .. } => "Failed to sign rendition URL".to_string(),
            Error::Qpdf { .. } | Error::Pdfium { .. } => "PDF processing error".to_string(),
        }
    }
}
