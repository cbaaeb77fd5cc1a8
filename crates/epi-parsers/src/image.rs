use epi_core::Mask;
use image::{DynamicImage, GenericImageView};

use crate::error::VectorizeError;

/// Configuration for binarising a raster image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageConfig {
    /// Cut-off (0-255) applied to luminance, or to alpha when `use_alpha` applies.
    pub threshold: u8,
    /// Swap foreground and background after thresholding.
    pub invert: bool,
    /// For images with an alpha channel, opaque pixels are foreground.
    pub use_alpha: bool,
    /// Larger images are downscaled so neither side exceeds this.
    pub max_dimension: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            invert: false,
            use_alpha: true,
            max_dimension: 256,
        }
    }
}

/// Decode image bytes and binarise them into a [`Mask`].
///
/// Without usable alpha, dark pixels (luminance below the threshold) are
/// foreground: ink on paper.
pub fn load_mask(data: &[u8], config: &ImageConfig) -> Result<Mask, VectorizeError> {
    let img = image::load_from_memory(data)?;
    let max = config.max_dimension.max(1);
    let img = if img.width() > max || img.height() > max {
        img.thumbnail(max, max)
    } else {
        img
    };
    Ok(image_to_mask(&img, config))
}

/// Threshold an already decoded image.
pub fn image_to_mask(img: &DynamicImage, config: &ImageConfig) -> Mask {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Mask::new(0, 0);
    }

    let by_alpha = config.use_alpha && img.color().has_alpha();
    let luma = img.to_luma_alpha8();

    Mask::from_fn(width as usize, height as usize, |x, y| {
        let [l, a] = luma.get_pixel(x as u32, y as u32).0;
        let on = if by_alpha {
            a > config.threshold
        } else {
            l < config.threshold
        };
        on != config.invert
    })
}
