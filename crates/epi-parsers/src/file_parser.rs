//! Source dispatch: routes files to the SVG or image path by extension.

use std::path::Path;

use crate::error::VectorizeError;
use crate::vectorize::VectorSource;

/// Supported source file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Svg,
    Image,
    Unknown,
}

impl SourceType {
    /// Detect source type from extension string (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "svg" => SourceType::Svg,
            "png" | "jpg" | "jpeg" | "bmp" | "gif" | "tiff" | "tga" | "webp" => SourceType::Image,
            _ => SourceType::Unknown,
        }
    }
}

/// Wrap raw bytes as a source given its file extension (without the dot).
pub fn source_from_bytes(data: Vec<u8>, extension: &str) -> Result<VectorSource, VectorizeError> {
    match SourceType::from_extension(extension) {
        SourceType::Svg => Ok(VectorSource::SvgDocument(data)),
        SourceType::Image => Ok(VectorSource::Image(data)),
        SourceType::Unknown => Err(VectorizeError::UnsupportedSource(extension.to_string())),
    }
}

/// Read a file from disk as a source.
pub fn load_source(path: &Path) -> Result<VectorSource, VectorizeError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string();
    if SourceType::from_extension(&extension) == SourceType::Unknown {
        return Err(VectorizeError::UnsupportedSource(path.display().to_string()));
    }
    let data = std::fs::read(path)?;
    source_from_bytes(data, &extension)
}
