/// Convenience result type used across keycomp.
pub type KeycompResult<T> = Result<T, KeycompError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum KeycompError {
    /// A required source image (subject or backdrop) was not supplied.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// The subject does not fit inside the backdrop, so centered placement would
    /// write outside the result grid.
    #[error(
        "subject {subject_width}x{subject_height} does not fit inside backdrop {backdrop_width}x{backdrop_height}"
    )]
    OutOfBoundsComposite {
        /// Subject width in pixels.
        subject_width: u32,
        /// Subject height in pixels.
        subject_height: u32,
        /// Backdrop width in pixels.
        backdrop_width: u32,
        /// Backdrop height in pixels.
        backdrop_height: u32,
    },

    /// Smoothing intensity outside the accepted kernel range.
    #[error("invalid smoothing intensity {value}: expected a kernel size in 1..=21")]
    InvalidIntensity {
        /// The rejected value.
        value: u32,
    },

    /// The blur kernel leaves no interior pixels, so the smoothed output is all black.
    ///
    /// Only returned when the pipeline runs with `strict_degenerate_blur`.
    #[error("degenerate blur: kernel {kernel} leaves no interior pixels in a {width}x{height} image")]
    DegenerateBlur {
        /// Kernel side length.
        kernel: u32,
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// Invalid user-provided data (grid buffers, configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing job files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeycompError {
    /// Build a [`KeycompError::MissingInput`] value.
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Build a [`KeycompError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KeycompError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
