use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{
    error::{KeycompError, KeycompResult},
    grid::{RgbGrid, RgbaGrid},
};

/// Copy an RGBA grid into an `image` buffer.
pub fn rgba_grid_to_image(grid: &RgbaGrid) -> KeycompResult<image::RgbaImage> {
    image::RgbaImage::from_raw(grid.width(), grid.height(), grid.as_raw().to_vec())
        .ok_or_else(|| KeycompError::validation("rgba grid buffer does not match its dimensions"))
}

/// Copy an RGB grid into an `image` buffer.
pub fn rgb_grid_to_image(grid: &RgbGrid) -> KeycompResult<image::RgbImage> {
    image::RgbImage::from_raw(grid.width(), grid.height(), grid.as_raw().to_vec())
        .ok_or_else(|| KeycompError::validation("rgb grid buffer does not match its dimensions"))
}

/// Encode an RGBA grid to `path`, choosing the format from the file extension.
///
/// Formats without an alpha channel (JPEG) receive the color channels only. Missing parent
/// directories are created.
pub fn save_rgba_grid(grid: &RgbaGrid, path: &Path) -> KeycompResult<()> {
    if grid.is_empty() {
        return Err(KeycompError::validation(format!(
            "cannot encode empty {}x{} grid to '{}'",
            grid.width(),
            grid.height(),
            path.display()
        )));
    }

    let format = image::ImageFormat::from_path(path)
        .with_context(|| format!("unsupported output format for '{}'", path.display()))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let img = image::DynamicImage::ImageRgba8(rgba_grid_to_image(grid)?);
    let img = match format {
        image::ImageFormat::Jpeg => image::DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };
    img.save_with_format(path, format)
        .with_context(|| format!("write image '{}'", path.display()))?;

    tracing::debug!(path = %path.display(), ?format, "saved grid");
    Ok(())
}

/// Consumer of finished grids: the presentation or encoding side of the pipeline.
pub trait GridSink {
    /// Accept a grid produced by one user-triggered operation.
    fn present(&mut self, grid: &RgbaGrid, title: &str) -> KeycompResult<()>;
}

/// Sink that encodes every presented grid to a file.
///
/// The first grid goes to `path`; later grids get a numeric suffix before the extension
/// (`out.png`, `out-1.png`, `out-2.png`, ...).
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&self) -> PathBuf {
        let n = self.written.len();
        if n == 0 {
            return self.path.clone();
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match self.path.extension() {
            Some(ext) => format!("{stem}-{n}.{}", ext.to_string_lossy()),
            None => format!("{stem}-{n}"),
        };
        self.path.with_file_name(name)
    }
}

impl GridSink for FileSink {
    fn present(&mut self, grid: &RgbaGrid, title: &str) -> KeycompResult<()> {
        let path = self.next_path();
        save_rgba_grid(grid, &path)?;
        tracing::info!(path = %path.display(), title, "wrote grid");
        self.written.push(path);
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Presented grids with their titles, in order.
    pub grids: Vec<(String, RgbaGrid)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GridSink for InMemorySink {
    fn present(&mut self, grid: &RgbaGrid, title: &str) -> KeycompResult<()> {
        self.grids.push((title.to_string(), grid.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
