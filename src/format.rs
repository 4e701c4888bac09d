//! Output formats for cached renditions

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format of a rendition.
///
/// This is a closed set: parsing an external string into it is the only
/// place an [`Error::UnsupportedFormat`] can originate, so format validity
/// is settled before any fetch or extraction work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Native single-page PDF (lossless, vector content preserved)
    Pdf,
    /// Rasterized page image
    Webp,
    /// Scalable vector image
    Svg,
}

impl OutputFormat {
    /// MIME type served for this format.
    /// Stable contract with the viewing frontend.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Webp => "image/webp",
            OutputFormat::Svg => "image/svg+xml",
        }
    }

    /// File extension used in artifact keys.
    /// Part of the key layout; must not change across releases.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Webp => "webp",
            OutputFormat::Svg => "svg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(OutputFormat::Pdf),
            "webp" => Ok(OutputFormat::Webp),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(Error::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
