use std::path::{Path, PathBuf};

/// Convenience result type used across the watermarker.
pub type WatermarkResult<T> = Result<T, WatermarkError>;

/// Error taxonomy for the whole watermarking run.
///
/// Which of these abort a run and which only skip a single target is decided by
/// [`crate::run_batch`]; the library itself never terminates the process.
#[derive(thiserror::Error, Debug)]
pub enum WatermarkError {
    /// The watermark is not a parseable SVG (or has an unusable size).
    #[error("invalid watermark source: {0}")]
    InvalidSource(String),

    /// A referenced path does not exist.
    #[error("missing file: {}", .0.display())]
    MissingFile(PathBuf),

    /// A target's extension is outside the accepted raster set.
    #[error("unsupported extension '{ext}' for {}", .path.display())]
    UnsupportedExtension {
        /// Offending path.
        path: PathBuf,
        /// Lowercased extension as found (empty when there is none).
        ext: String,
    },

    /// Anchor name outside the enumerated set.
    #[error("invalid anchor '{0}' (expected topleft, topright, bottomleft, bottomright or center)")]
    InvalidAnchor(String),

    /// Opacity not finite or outside `[0.0, 1.0]`.
    #[error("invalid opacity {0} (expected a value in 0.0..=1.0)")]
    InvalidOpacity(f32),

    /// Two targets would be written to the same output file.
    #[error(
        "{} would be written to {}, which already belongs to {}",
        .path.display(),
        .output.display(),
        .claimed_by.display()
    )]
    OutputCollision {
        /// Target that was skipped.
        path: PathBuf,
        /// Shared output path.
        output: PathBuf,
        /// Target that keeps the output.
        claimed_by: PathBuf,
    },

    /// A target exists but could not be decoded as an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Output could not be serialized or written.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A `.bak` copy could not be produced.
    #[error("backup of {} failed: {message}", .path.display())]
    Backup {
        /// File that was being backed up.
        path: PathBuf,
        /// Underlying failure.
        message: String,
    },

    /// Settings file unreadable or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Copyable discriminant of [`WatermarkError`], used in skip/failure lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`WatermarkError::InvalidSource`].
    InvalidSource,
    /// See [`WatermarkError::MissingFile`].
    MissingFile,
    /// See [`WatermarkError::UnsupportedExtension`].
    UnsupportedExtension,
    /// See [`WatermarkError::InvalidAnchor`].
    InvalidAnchor,
    /// See [`WatermarkError::InvalidOpacity`].
    InvalidOpacity,
    /// See [`WatermarkError::OutputCollision`].
    OutputCollision,
    /// See [`WatermarkError::Decode`].
    Decode,
    /// See [`WatermarkError::Encoding`].
    Encoding,
    /// See [`WatermarkError::Backup`].
    Backup,
    /// See [`WatermarkError::Config`].
    Config,
    /// See [`WatermarkError::Other`].
    Other,
}

impl WatermarkError {
    /// Build a [`WatermarkError::InvalidSource`] value.
    pub fn invalid_source(msg: impl Into<String>) -> Self {
        Self::InvalidSource(msg.into())
    }

    /// Build a [`WatermarkError::MissingFile`] value.
    pub fn missing_file(path: impl AsRef<Path>) -> Self {
        Self::MissingFile(path.as_ref().to_path_buf())
    }

    /// Build a [`WatermarkError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`WatermarkError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`WatermarkError::Backup`] value.
    pub fn backup(path: impl AsRef<Path>, msg: impl Into<String>) -> Self {
        Self::Backup {
            path: path.as_ref().to_path_buf(),
            message: msg.into(),
        }
    }

    /// Build a [`WatermarkError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Discriminant of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSource(_) => ErrorKind::InvalidSource,
            Self::MissingFile(_) => ErrorKind::MissingFile,
            Self::UnsupportedExtension { .. } => ErrorKind::UnsupportedExtension,
            Self::InvalidAnchor(_) => ErrorKind::InvalidAnchor,
            Self::InvalidOpacity(_) => ErrorKind::InvalidOpacity,
            Self::OutputCollision { .. } => ErrorKind::OutputCollision,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::Backup { .. } => ErrorKind::Backup,
            Self::Config(_) => ErrorKind::Config,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
