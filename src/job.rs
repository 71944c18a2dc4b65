use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::{
        error::{KeycompError, KeycompResult},
        threading::Threading,
    },
    pipeline::PipelineOpts,
    stages::blur::{BorderMode, SmoothingIntensity},
};

/// Backdrop smoothing settings in a job file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmoothingSpec {
    /// Kernel side length in `1..=21`.
    pub intensity: u32,
    /// Border handling; defaults to black borders.
    #[serde(default)]
    pub border: BorderMode,
}

/// One compose operation described as JSON.
///
/// ```json
/// {
///   "subject": "person.png",
///   "backdrop": "landscape.jpg",
///   "out": "out/result.png",
///   "smoothing": { "intensity": 7, "border": "clamp_edge" },
///   "threading": { "parallel": true }
/// }
/// ```
///
/// Relative paths resolve against the directory holding the job file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposeJob {
    /// Foreground image with a bright background.
    pub subject: PathBuf,
    /// Base image.
    pub backdrop: PathBuf,
    /// Output image path; the extension picks the format.
    pub out: PathBuf,
    /// Smooth the backdrop before compositing.
    #[serde(default)]
    pub smoothing: Option<SmoothingSpec>,
    /// Row parallelism.
    #[serde(default)]
    pub threading: Threading,
    /// Fail instead of warning when the blur leaves no interior pixels.
    #[serde(default)]
    pub strict_degenerate_blur: bool,
}

impl ComposeJob {
    /// Parse a job from a JSON string. Paths are kept as written.
    pub fn from_json(text: &str) -> KeycompResult<Self> {
        serde_json::from_str(text).map_err(|e| KeycompError::serde(e.to_string()))
    }

    /// Read a job file and resolve its relative paths against the file's directory.
    pub fn from_path(path: &Path) -> KeycompResult<Self> {
        let f = File::open(path).with_context(|| format!("open job '{}'", path.display()))?;
        let job: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| KeycompError::serde(format!("parse job '{}': {e}", path.display())))?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(job.resolve_relative_to(root))
    }

    /// Prefix every relative path with `root`.
    pub fn resolve_relative_to(mut self, root: &Path) -> Self {
        for p in [&mut self.subject, &mut self.backdrop, &mut self.out] {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        }
        self
    }

    /// Check settings that can be rejected before any image is loaded.
    pub fn validate(&self) -> KeycompResult<()> {
        if let Some(s) = &self.smoothing {
            SmoothingIntensity::new(s.intensity)?;
        }
        if self.threading.threads == Some(0) {
            return Err(KeycompError::validation(
                "threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Pipeline options described by this job.
    pub fn pipeline_opts(&self) -> PipelineOpts {
        PipelineOpts {
            threading: self.threading.clone(),
            border: self
                .smoothing
                .as_ref()
                .map(|s| s.border)
                .unwrap_or_default(),
            strict_degenerate_blur: self.strict_degenerate_blur,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
