use crate::{
    assets::raster::RasterImage,
    foundation::{
        error::{KeycompError, KeycompResult},
        grid::{RgbGrid, RgbaGrid},
        threading::{RowExecutor, Threading},
    },
    stages::{
        blur::{BorderMode, BoxBlur, SmoothingIntensity, box_blur_rows},
        composite::{composite_rows, placement_offset},
        extract::extract_rgb,
        mask::key_mask_rows,
    },
};

/// Tunables shared by every pipeline run.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineOpts {
    /// Row parallelism for the masking, blur and compositing stages.
    pub threading: Threading,
    /// Border handling for backdrop smoothing.
    pub border: BorderMode,
    /// Reject blurs that would leave no interior pixels instead of logging a warning.
    pub strict_degenerate_blur: bool,
}

/// Configured subject/backdrop compositing pipeline.
///
/// Stages:
/// 1. extract RGB from both images
/// 2. chroma-key the subject
/// 3. optionally box-blur the backdrop
/// 4. paste the subject centered over the backdrop
///
/// Every call re-extracts from the images it is given; nothing is cached between calls.
pub struct Pipeline {
    opts: PipelineOpts,
    exec: RowExecutor,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            opts: PipelineOpts::default(),
            exec: RowExecutor::Sequential,
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("opts", &self.opts).finish()
    }
}

impl Pipeline {
    /// Build a pipeline, spinning up a thread pool when `opts.threading.parallel` is set.
    pub fn new(opts: PipelineOpts) -> KeycompResult<Self> {
        let exec = RowExecutor::new(&opts.threading)?;
        Ok(Self { opts, exec })
    }

    /// Options this pipeline was built with.
    pub fn opts(&self) -> &PipelineOpts {
        &self.opts
    }

    /// Key out the subject's bright background and paste it centered over the backdrop.
    #[tracing::instrument(skip_all)]
    pub fn composite(
        &self,
        subject: Option<&dyn RasterImage>,
        backdrop: Option<&dyn RasterImage>,
    ) -> KeycompResult<RgbaGrid> {
        let (subject, backdrop) = require_inputs(subject, backdrop)?;
        check_fit(subject, backdrop)?;

        let cut = self.cut_out(subject);
        let base = extract_rgb(backdrop);
        self.paste(&cut, &base)
    }

    /// Like [`Pipeline::composite`], with the backdrop box-blurred first.
    ///
    /// `intensity` is the kernel side and must lie in `1..=21`.
    #[tracing::instrument(skip(self, subject, backdrop))]
    pub fn composite_smoothed(
        &self,
        subject: Option<&dyn RasterImage>,
        backdrop: Option<&dyn RasterImage>,
        intensity: u32,
    ) -> KeycompResult<RgbaGrid> {
        let (subject, backdrop) = require_inputs(subject, backdrop)?;
        let intensity = SmoothingIntensity::new(intensity)?;
        check_fit(subject, backdrop)?;

        let cut = self.cut_out(subject);
        let base = self.smooth(backdrop, intensity)?;
        self.paste(&cut, &base)
    }

    /// Extract and chroma-key a subject image.
    pub fn cut_out(&self, subject: &dyn RasterImage) -> RgbaGrid {
        let rgb = extract_rgb(subject);
        let cut = key_mask_rows(&rgb, &self.exec);
        tracing::debug!(
            width = cut.width(),
            height = cut.height(),
            "keyed subject"
        );
        cut
    }

    /// Extract and box-blur an image using this pipeline's border mode.
    pub fn smooth(
        &self,
        image: &dyn RasterImage,
        intensity: SmoothingIntensity,
    ) -> KeycompResult<RgbGrid> {
        let rgb = extract_rgb(image);
        self.smooth_grid(&rgb, intensity)
    }

    /// Box-blur an already extracted grid using this pipeline's border mode.
    pub fn smooth_grid(
        &self,
        rgb: &RgbGrid,
        intensity: SmoothingIntensity,
    ) -> KeycompResult<RgbGrid> {
        let blur = BoxBlur::new(intensity).with_border(self.opts.border);
        let (width, height) = rgb.dimensions();
        if blur.is_degenerate(width, height) {
            if self.opts.strict_degenerate_blur {
                return Err(KeycompError::DegenerateBlur {
                    kernel: intensity.get(),
                    width,
                    height,
                });
            }
            tracing::warn!(
                kernel = intensity.get(),
                width,
                height,
                border = ?blur.border,
                "blur kernel leaves no interior pixels"
            );
        }

        let out = box_blur_rows(rgb, &blur, &self.exec);
        tracing::debug!(kernel = intensity.get(), width, height, "smoothed backdrop");
        Ok(out)
    }

    fn paste(&self, cut: &RgbaGrid, base: &RgbGrid) -> KeycompResult<RgbaGrid> {
        let out = composite_rows(cut, base, &self.exec)?;
        tracing::debug!(
            width = out.width(),
            height = out.height(),
            "composited subject over backdrop"
        );
        Ok(out)
    }
}

/// Composite with default options (sequential, black blur borders).
pub fn composite(
    subject: Option<&dyn RasterImage>,
    backdrop: Option<&dyn RasterImage>,
) -> KeycompResult<RgbaGrid> {
    Pipeline::default().composite(subject, backdrop)
}

/// Smoothed composite with default options (sequential, black blur borders).
pub fn composite_smoothed(
    subject: Option<&dyn RasterImage>,
    backdrop: Option<&dyn RasterImage>,
    intensity: u32,
) -> KeycompResult<RgbaGrid> {
    Pipeline::default().composite_smoothed(subject, backdrop, intensity)
}

fn require_inputs<'a>(
    subject: Option<&'a dyn RasterImage>,
    backdrop: Option<&'a dyn RasterImage>,
) -> KeycompResult<(&'a dyn RasterImage, &'a dyn RasterImage)> {
    match (subject, backdrop) {
        (Some(s), Some(b)) => Ok((s, b)),
        (None, Some(_)) => Err(KeycompError::missing_input("no subject image selected")),
        (Some(_), None) => Err(KeycompError::missing_input("no backdrop image selected")),
        (None, None) => Err(KeycompError::missing_input(
            "no subject or backdrop image selected",
        )),
    }
}

fn check_fit(subject: &dyn RasterImage, backdrop: &dyn RasterImage) -> KeycompResult<()> {
    placement_offset(
        (subject.width(), subject.height()),
        (backdrop.width(), backdrop.height()),
    )
    .map(|_| ())
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
