//! Source-to-curve pipeline: rasterise or decode, binarise, trace, resample.

use epi_core::geometry::resample;
use epi_core::{trace_contour, Mask, Point};

use crate::error::VectorizeError;
use crate::image::{load_mask, ImageConfig};
use crate::svg::{parse_path_data, parse_svg, rasterize_tree};

/// Something that can be vectorised into a closed curve.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorSource {
    /// A bare SVG path `d` string.
    SvgPath(String),
    /// A complete SVG document.
    SvgDocument(Vec<u8>),
    /// Encoded raster image bytes (PNG, JPEG, ...).
    Image(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorizeConfig {
    /// Points in the resampled output.
    pub sample_count: usize,
    /// Longer side, in pixels, of the raster SVG documents are rendered into.
    pub svg_raster_size: u32,
    pub image: ImageConfig,
}

impl Default for VectorizeConfig {
    fn default() -> Self {
        Self {
            sample_count: 600,
            svg_raster_size: 256,
            image: ImageConfig::default(),
        }
    }
}

/// Binarised raster of a source, y down.
pub fn source_mask(source: &VectorSource, config: &VectorizeConfig) -> Result<Mask, VectorizeError> {
    match source {
        VectorSource::SvgPath(d) => Ok(rasterize_tree(&parse_path_data(d)?, config.svg_raster_size)),
        VectorSource::SvgDocument(data) => Ok(rasterize_tree(&parse_svg(data)?, config.svg_raster_size)),
        VectorSource::Image(data) => load_mask(data, &config.image),
    }
}

/// Vectorise a source into `sample_count` evenly spaced points, centred, y up.
///
/// The longest traced contour is used. A source with no contour yields an
/// empty point set rather than an error.
pub fn vectorize(source: &VectorSource, config: &VectorizeConfig) -> Result<Vec<Point>, VectorizeError> {
    let mask = source_mask(source, config)?;
    let contour = trace_contour(&mask);
    if contour.is_empty() {
        log::warn!(
            "no contour found in {}x{} raster; source yields an empty curve",
            mask.width(),
            mask.height()
        );
        return Ok(Vec::new());
    }

    let flipped: Vec<Point> = contour.iter().map(|p| Point::new(p.x, -p.y)).collect();
    let points = resample(&flipped, config.sample_count);
    log::debug!("vectorized {} contour pixels into {} points", contour.len(), points.len());
    Ok(points)
}
