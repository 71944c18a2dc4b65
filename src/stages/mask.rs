use crate::foundation::{
    grid::{Rgb8, Rgba8, RgbGrid, RgbaGrid},
    threading::RowExecutor,
};

/// Channels strictly above this value on all of R, G and B count as background.
pub const KEY_THRESHOLD: u8 = 200;

/// Binary chroma key for a single pixel.
///
/// Near-white pixels become `(0, 0, 0, 0)`; everything else keeps its color with alpha 255.
pub fn key_pixel([r, g, b]: Rgb8) -> Rgba8 {
    if r > KEY_THRESHOLD && g > KEY_THRESHOLD && b > KEY_THRESHOLD {
        [0, 0, 0, 0]
    } else {
        [r, g, b, 255]
    }
}

/// Derive an RGBA grid whose alpha marks the subject and hides the bright background.
pub fn key_mask(rgb: &RgbGrid) -> RgbaGrid {
    key_mask_rows(rgb, &RowExecutor::Sequential)
}

pub(crate) fn key_mask_rows(rgb: &RgbGrid, exec: &RowExecutor) -> RgbaGrid {
    let mut out = RgbaGrid::new(rgb.width(), rgb.height());
    let row_len = out.row_len();
    exec.for_each_row(out.raw_mut(), row_len, |y, row| {
        for (dst, src) in row.chunks_exact_mut(4).zip(rgb.row(y).chunks_exact(3)) {
            dst.copy_from_slice(&key_pixel([src[0], src[1], src[2]]));
        }
    });
    out
}

#[cfg(test)]
#[path = "../../tests/unit/stages/mask.rs"]
mod tests;
