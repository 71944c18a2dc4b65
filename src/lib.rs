//! keycomp cuts a subject out of its bright background and composes it over a backdrop.
//!
//! # Pipeline overview
//!
//! 1. **Extract**: `RasterImage -> RgbGrid` (channel extraction, no conversion)
//! 2. **Key**: `RgbGrid -> RgbaGrid` (near-white pixels become fully transparent)
//! 3. **Smooth** (optional): `RgbGrid -> RgbGrid` (k×k box blur of the backdrop)
//! 4. **Composite**: `(RgbaGrid, RgbGrid) -> RgbaGrid` (subject pasted centered, no blending)
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure stages**: every stage allocates a new grid and never mutates its input.
//! - **No IO in stages**: decoding and encoding live in the asset helpers and sinks.
//! - **Binary alpha**: keyed pixels are either 0 or 255, never in between.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod job;
mod pipeline;
mod session;
mod stages;

pub use assets::decode::{decode_image, open_image};
pub use assets::encode::{
    FileSink, GridSink, InMemorySink, rgb_grid_to_image, rgba_grid_to_image, save_rgba_grid,
};
pub use assets::raster::RasterImage;
pub use foundation::error::{KeycompError, KeycompResult};
pub use foundation::grid::{PixelGrid, Rgb8, Rgba8, RgbGrid, RgbaGrid};
pub use foundation::threading::Threading;
pub use job::{ComposeJob, SmoothingSpec};
pub use pipeline::{Pipeline, PipelineOpts, composite, composite_smoothed};
pub use session::ImageSlots;
pub use stages::blur::{BorderMode, BoxBlur, SmoothingIntensity, box_blur};
pub use stages::composite::{composite_centered, placement_offset};
pub use stages::extract::extract_rgb;
pub use stages::mask::{KEY_THRESHOLD, key_mask, key_pixel};
