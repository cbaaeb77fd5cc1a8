use thiserror::Error;

/// Failures while turning an SVG or raster source into a point set.
///
/// An image that loads but contains no usable contour is not an error:
/// vectorization then yields an empty point set.
#[derive(Debug, Error)]
pub enum VectorizeError {
    #[error("failed to parse SVG: {0}")]
    Svg(String),
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("unsupported source type: {0}")]
    UnsupportedSource(String),
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
}
