use crate::foundation::{
    error::{KeycompError, KeycompResult},
    grid::RgbGrid,
    threading::RowExecutor,
};

/// Box-blur kernel side length, validated to `MIN..=MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SmoothingIntensity(u32);

impl SmoothingIntensity {
    /// Smallest accepted kernel side (identity blur).
    pub const MIN: u32 = 1;
    /// Largest accepted kernel side.
    pub const MAX: u32 = 21;
    /// Intensity offered when the user has not picked one.
    pub const DEFAULT: Self = Self(5);

    /// Validate a kernel side length.
    pub fn new(value: u32) -> KeycompResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(KeycompError::InvalidIntensity { value });
        }
        Ok(Self(value))
    }

    /// Kernel side length.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Half the kernel side, truncated. Even sizes give a window shifted towards the origin.
    pub fn offset(self) -> u32 {
        self.0 / 2
    }
}

impl Default for SmoothingIntensity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for SmoothingIntensity {
    type Error = KeycompError;

    fn try_from(value: u32) -> KeycompResult<Self> {
        Self::new(value)
    }
}

impl From<SmoothingIntensity> for u32 {
    fn from(v: SmoothingIntensity) -> u32 {
        v.0
    }
}

/// What happens to pixels closer than `offset` to an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Border pixels stay black (0, 0, 0).
    #[default]
    Black,
    /// Border pixels are copied from the source unchanged.
    CopySource,
    /// Border pixels average the full window with coordinates clamped to the image.
    ClampEdge,
}

/// Uniform-weight k×k smoothing filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoxBlur {
    /// Kernel side length.
    pub intensity: SmoothingIntensity,
    /// Border handling.
    pub border: BorderMode,
}

impl BoxBlur {
    /// Blur with the given intensity and black borders.
    pub fn new(intensity: SmoothingIntensity) -> Self {
        Self {
            intensity,
            border: BorderMode::Black,
        }
    }

    /// Replace the border mode.
    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }

    /// `true` when a non-empty `width`x`height` image has no interior pixels for this kernel.
    pub fn is_degenerate(&self, width: u32, height: u32) -> bool {
        let twice = 2 * self.intensity.offset();
        width > 0 && height > 0 && twice > 0 && (width <= twice || height <= twice)
    }

    /// Smooth `src` into a new grid of the same dimensions.
    pub fn apply(&self, src: &RgbGrid) -> RgbGrid {
        box_blur_rows(src, self, &RowExecutor::Sequential)
    }
}

/// Apply a box blur with black borders; shorthand for [`BoxBlur::apply`].
pub fn box_blur(src: &RgbGrid, intensity: SmoothingIntensity) -> RgbGrid {
    BoxBlur::new(intensity).apply(src)
}

pub(crate) fn box_blur_rows(src: &RgbGrid, blur: &BoxBlur, exec: &RowExecutor) -> RgbGrid {
    let (width, height) = src.dimensions();
    let k = blur.intensity.get();
    let offset = blur.intensity.offset();

    let mut out = RgbGrid::new(width, height);
    let row_len = out.row_len();
    exec.for_each_row(out.raw_mut(), row_len, |y, row| {
        let y_interior = y >= offset && y + offset < height;
        for x in 0..width {
            let interior = y_interior && x >= offset && x + offset < width;
            let px = if interior {
                window_mean(src, x, y, k, offset)
            } else {
                match blur.border {
                    BorderMode::Black => continue,
                    BorderMode::CopySource => src.pixel(x, y).unwrap_or([0, 0, 0]),
                    BorderMode::ClampEdge => window_mean_clamped(src, x, y, k, offset),
                }
            };
            let i = x as usize * 3;
            row[i..i + 3].copy_from_slice(&px);
        }
    });
    out
}

// Caller guarantees the window `[x - offset, x - offset + k)` lies inside the grid.
fn window_mean(src: &RgbGrid, x: u32, y: u32, k: u32, offset: u32) -> [u8; 3] {
    let x0 = (x - offset) as usize;
    let mut sums = [0u32; 3];
    for sy in (y - offset)..(y - offset + k) {
        let row = src.row(sy);
        for px in row[x0 * 3..(x0 + k as usize) * 3].chunks_exact(3) {
            sums[0] += u32::from(px[0]);
            sums[1] += u32::from(px[1]);
            sums[2] += u32::from(px[2]);
        }
    }
    divide(sums, k * k)
}

fn window_mean_clamped(src: &RgbGrid, x: u32, y: u32, k: u32, offset: u32) -> [u8; 3] {
    let max_x = i64::from(src.width()) - 1;
    let max_y = i64::from(src.height()) - 1;
    let mut sums = [0u32; 3];
    for dy in 0..k {
        let sy = (i64::from(y) + i64::from(dy) - i64::from(offset)).clamp(0, max_y) as u32;
        for dx in 0..k {
            let sx = (i64::from(x) + i64::from(dx) - i64::from(offset)).clamp(0, max_x) as u32;
            let px = src.pixel(sx, sy).unwrap_or([0, 0, 0]);
            sums[0] += u32::from(px[0]);
            sums[1] += u32::from(px[1]);
            sums[2] += u32::from(px[2]);
        }
    }
    divide(sums, k * k)
}

fn divide(sums: [u32; 3], n: u32) -> [u8; 3] {
    sums.map(|s| (s / n) as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/stages/blur.rs"]
mod tests;
