use crate::{assets::raster::RasterImage, foundation::grid::RgbGrid};

/// Read every pixel of `image` into an RGB grid of identical dimensions.
///
/// No channel reordering, color conversion, or resizing happens here. A zero-sized image
/// yields an empty grid.
pub fn extract_rgb<I: RasterImage + ?Sized>(image: &I) -> RgbGrid {
    RgbGrid::from_fn(image.width(), image.height(), |x, y| image.pixel_at(x, y))
}

#[cfg(test)]
#[path = "../../tests/unit/stages/extract.rs"]
mod tests;
