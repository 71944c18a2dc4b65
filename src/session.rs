use std::path::Path;

use crate::{
    assets::{decode::open_image, encode::GridSink, raster::RasterImage},
    foundation::{error::KeycompResult, grid::RgbaGrid},
    pipeline::Pipeline,
    stages::extract::extract_rgb,
};

/// The two images a user has selected, plus the pipeline that composes them.
///
/// Each action reads the slots as they are at call time; opening a new image simply replaces
/// the slot. Results go to the [`GridSink`] passed to each call.
#[derive(Debug, Default)]
pub struct ImageSlots {
    subject: Option<image::DynamicImage>,
    backdrop: Option<image::DynamicImage>,
    pipeline: Pipeline,
}

impl ImageSlots {
    /// Empty slots composing with `pipeline`.
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            subject: None,
            backdrop: None,
            pipeline,
        }
    }

    /// Pipeline used by [`ImageSlots::compose`] and [`ImageSlots::compose_smoothed`].
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Currently selected subject, if any.
    pub fn subject(&self) -> Option<&image::DynamicImage> {
        self.subject.as_ref()
    }

    /// Currently selected backdrop, if any.
    pub fn backdrop(&self) -> Option<&image::DynamicImage> {
        self.backdrop.as_ref()
    }

    /// Replace the subject slot.
    pub fn set_subject(&mut self, img: image::DynamicImage) {
        self.subject = Some(img);
    }

    /// Replace the backdrop slot.
    pub fn set_backdrop(&mut self, img: image::DynamicImage) {
        self.backdrop = Some(img);
    }

    /// Load the subject from disk and present it as selected.
    ///
    /// On failure the previous subject stays selected.
    pub fn open_subject(&mut self, path: &Path, sink: &mut dyn GridSink) -> KeycompResult<()> {
        let img = open_image(path)?;
        sink.present(&opaque_preview(&img), "selected subject image")?;
        self.subject = Some(img);
        Ok(())
    }

    /// Load the backdrop from disk and present it as selected.
    ///
    /// On failure the previous backdrop stays selected.
    pub fn open_backdrop(&mut self, path: &Path, sink: &mut dyn GridSink) -> KeycompResult<()> {
        let img = open_image(path)?;
        sink.present(&opaque_preview(&img), "selected backdrop image")?;
        self.backdrop = Some(img);
        Ok(())
    }

    /// Compose the selected images and present the result.
    pub fn compose(&self, sink: &mut dyn GridSink) -> KeycompResult<RgbaGrid> {
        let out = self
            .pipeline
            .composite(self.subject_raster(), self.backdrop_raster())?;
        sink.present(&out, "composition result")?;
        Ok(out)
    }

    /// Compose over a smoothed backdrop and present the result.
    pub fn compose_smoothed(
        &self,
        intensity: u32,
        sink: &mut dyn GridSink,
    ) -> KeycompResult<RgbaGrid> {
        let out = self.pipeline.composite_smoothed(
            self.subject_raster(),
            self.backdrop_raster(),
            intensity,
        )?;
        sink.present(
            &out,
            &format!("smoothed composition result (intensity: {intensity})"),
        )?;
        Ok(out)
    }

    fn subject_raster(&self) -> Option<&dyn RasterImage> {
        self.subject.as_ref().map(|i| i as &dyn RasterImage)
    }

    fn backdrop_raster(&self) -> Option<&dyn RasterImage> {
        self.backdrop.as_ref().map(|i| i as &dyn RasterImage)
    }
}

fn opaque_preview(img: &image::DynamicImage) -> RgbaGrid {
    let rgb = extract_rgb(img);
    RgbaGrid::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.pixel(x, y).unwrap_or([0, 0, 0]);
        [r, g, b, 255]
    })
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
