use super::*;

#[test]
fn rgba_image_ignores_alpha() {
    let img = RgbaImage::from_raw(2, 1, vec![10, 20, 30, 0, 40, 50, 60, 255]).unwrap();
    assert_eq!(RasterImage::width(&img), 2);
    assert_eq!(RasterImage::height(&img), 1);
    assert_eq!(img.pixel_at(0, 0), [10, 20, 30]);
    assert_eq!(img.pixel_at(1, 0), [40, 50, 60]);
}

#[test]
fn dynamic_image_reads_8bit_color() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_raw(1, 2, vec![1, 2, 3, 4, 5, 6]).unwrap());
    assert_eq!(RasterImage::width(&img), 1);
    assert_eq!(RasterImage::height(&img), 2);
    assert_eq!(img.pixel_at(0, 1), [4, 5, 6]);
}

#[test]
fn grayscale_expands_to_equal_channels() {
    let img = DynamicImage::ImageLuma8(image::GrayImage::from_raw(1, 1, vec![77]).unwrap());
    assert_eq!(img.pixel_at(0, 0), [77, 77, 77]);
}

#[test]
fn rgb_grid_is_a_raster() {
    let grid = RgbGrid::from_fn(2, 2, |x, y| [x as u8, y as u8, 9]);
    assert_eq!(RasterImage::width(&grid), 2);
    assert_eq!(grid.pixel_at(1, 1), [1, 1, 9]);
}
