use crate::foundation::error::{KeycompError, KeycompResult};

/// Dense, row-major 2-D grid of `C`-channel 8-bit pixels.
///
/// The backing buffer is tightly packed: pixel `(x, y)` starts at byte
/// `(y * width + x) * C`. Dimensions are fixed at construction. Pipeline stages never
/// mutate their input grid; they allocate and return a fresh one.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelGrid<const C: usize> {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Three-channel (R, G, B) grid.
pub type RgbGrid = PixelGrid<3>;
/// Four-channel (R, G, B, A) grid.
pub type RgbaGrid = PixelGrid<4>;

/// One RGB pixel.
pub type Rgb8 = [u8; 3];
/// One RGBA pixel.
pub type Rgba8 = [u8; 4];

impl<const C: usize> PixelGrid<C> {
    /// Number of channels per pixel.
    pub const CHANNELS: usize = C;

    /// Allocate a zero-filled grid (every channel of every pixel is 0).
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * C;
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    /// Wrap an existing tightly packed buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> KeycompResult<Self> {
        let expected = buffer_len::<C>(width, height)?;
        if data.len() != expected {
            return Err(KeycompError::validation(format!(
                "{width}x{height} grid with {C} channels expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid from wide integer channel values, rejecting anything outside `0..=255`.
    pub fn from_values(width: u32, height: u32, values: &[i32]) -> KeycompResult<Self> {
        let data = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                u8::try_from(v).map_err(|_| {
                    KeycompError::validation(format!(
                        "channel value {v} at index {i} is outside 0..=255"
                    ))
                })
            })
            .collect::<KeycompResult<Vec<u8>>>()?;
        Self::from_raw(width, height, data)
    }

    /// Build a grid by evaluating `f` for every `(x, y)` in row-major order.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; C]) -> Self {
        let mut grid = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                grid.put_pixel(x, y, f(x, y));
            }
        }
        grid
    }

    /// Grid width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Return `true` when the grid has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes per row.
    pub fn row_len(&self) -> usize {
        self.width as usize * C
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; C]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        let mut px = [0u8; C];
        px.copy_from_slice(&self.data[i..i + C]);
        Some(px)
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// Panics when `(x, y)` is out of bounds.
    pub fn put_pixel(&mut self, x: u32, y: u32, px: [u8; C]) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        let i = self.index(x, y);
        self.data[i..i + C].copy_from_slice(&px);
    }

    /// Packed bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let len = self.row_len();
        let start = y as usize * len;
        &self.data[start..start + len]
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; C]> + '_ {
        self.data.chunks_exact(C).map(|c| {
            let mut px = [0u8; C];
            px.copy_from_slice(c);
            px
        })
    }

    /// Borrow the packed buffer.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the grid and return the packed buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * C
    }
}

impl<const C: usize> std::fmt::Debug for PixelGrid<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelGrid")
            .field("channels", &C)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

fn buffer_len<const C: usize>(width: u32, height: u32) -> KeycompResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(C))
        .ok_or_else(|| KeycompError::validation("grid buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/grid.rs"]
mod tests;
