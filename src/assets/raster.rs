use image::{DynamicImage, GenericImageView, Pixel, RgbImage, RgbaImage};

use crate::foundation::grid::{Rgb8, RgbGrid};

/// Decoded raster image consumed by the channel extractor.
///
/// `pixel_at` is only called with `x < width()` and `y < height()`.
pub trait RasterImage {
    /// Image width in pixels.
    fn width(&self) -> u32;
    /// Image height in pixels.
    fn height(&self) -> u32;
    /// 8-bit color at `(x, y)`.
    fn pixel_at(&self, x: u32, y: u32) -> Rgb8;
}

impl RasterImage for DynamicImage {
    fn width(&self) -> u32 {
        DynamicImage::width(self)
    }

    fn height(&self) -> u32 {
        DynamicImage::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb8 {
        GenericImageView::get_pixel(self, x, y).to_rgb().0
    }
}

impl RasterImage for RgbImage {
    fn width(&self) -> u32 {
        RgbImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbImage::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb8 {
        self.get_pixel(x, y).0
    }
}

// Alpha is ignored: only the color bits feed the pipeline.
impl RasterImage for RgbaImage {
    fn width(&self) -> u32 {
        RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbaImage::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb8 {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}

impl RasterImage for RgbGrid {
    fn width(&self) -> u32 {
        RgbGrid::width(self)
    }

    fn height(&self) -> u32 {
        RgbGrid::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb8 {
        self.pixel(x, y).unwrap_or([0, 0, 0])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/raster.rs"]
mod tests;
