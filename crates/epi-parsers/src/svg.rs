use epi_core::Mask;
use image::{DynamicImage, RgbaImage};
use resvg::tiny_skia::Pixmap;

use crate::error::VectorizeError;
use crate::image::{image_to_mask, ImageConfig};

/// Empty pixels kept around the rendered outline so tracing sees a border.
const RASTER_PADDING: f32 = 2.0;

/// Smallest painted extent, in SVG user units, worth rasterising.
const MIN_EXTENT: f32 = 1e-4;

/// Parse an SVG document.
pub fn parse_svg(data: &[u8]) -> Result<usvg::Tree, VectorizeError> {
    usvg::Tree::from_data(data, &usvg::Options::default()).map_err(|e| VectorizeError::Svg(e.to_string()))
}

/// Parse a bare SVG path `d` attribute as a black-filled path.
pub fn parse_path_data(d: &str) -> Result<usvg::Tree, VectorizeError> {
    let escaped = d
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;");
    let doc = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="1000" height="1000"><path d="{escaped}"/></svg>"#
    );
    parse_svg(doc.as_bytes())
}

/// Number of paths in the tree that paint a fill or a stroke.
pub fn painted_paths(group: &usvg::Group) -> usize {
    group
        .children()
        .iter()
        .map(|child| match child {
            usvg::Node::Group(g) => painted_paths(g),
            usvg::Node::Path(path) => usize::from(path.fill().is_some() || path.stroke().is_some()),
            _ => 0,
        })
        .sum()
}

/// Render what the document paints into a raster whose longer side is `size` pixels.
///
/// The painted bounding box (strokes included) is fitted to the raster with
/// a small border, keeping aspect ratio. Fill rules, strokes and transforms
/// are honoured by `resvg`; the result is binarised on coverage alpha.
/// A document that paints nothing gives a blank mask.
pub fn rasterize_tree(tree: &usvg::Tree, size: u32) -> Mask {
    let size = size.max(8);
    let blank = || Mask::new(size as usize, size as usize);

    if painted_paths(tree.root()) == 0 {
        log::debug!("svg paints nothing");
        return blank();
    }

    let bbox = tree.root().abs_stroke_bounding_box();
    let extent = bbox.width().max(bbox.height());
    if extent <= MIN_EXTENT {
        return blank();
    }

    let scale = (size as f32 - 2.0 * RASTER_PADDING) / extent;
    let width = (bbox.width() * scale + 2.0 * RASTER_PADDING).ceil() as u32;
    let height = (bbox.height() * scale + 2.0 * RASTER_PADDING).ceil() as u32;
    let Some(mut pixmap) = Pixmap::new(width.max(1), height.max(1)) else {
        return blank();
    };

    let transform = usvg::Transform::from_translate(-bbox.x(), -bbox.y())
        .post_scale(scale, scale)
        .post_translate(RASTER_PADDING, RASTER_PADDING);
    resvg::render(tree, transform, &mut pixmap.as_mut());

    let (w, h) = (pixmap.width(), pixmap.height());
    let Some(rgba) = RgbaImage::from_raw(w, h, pixmap.take()) else {
        return blank();
    };
    let coverage = ImageConfig {
        use_alpha: true,
        invert: false,
        ..ImageConfig::default()
    };
    image_to_mask(&DynamicImage::ImageRgba8(rgba), &coverage)
}
