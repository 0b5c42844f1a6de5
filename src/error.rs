//! Error types for scene-curves operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scene-curves operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running a curve pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid configuration, rejected before any image is processed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Malformed record in the threshold resource.
    #[error("Threshold parse error at line {line}: {reason}")]
    ThresholdParse {
        /// 1-based line number of the offending record.
        line: usize,
        /// Reason for the failure.
        reason: String,
    },

    /// The threshold table has no entry for the requested scene.
    #[error("Unknown scene: {0} (absent from or excluded by the threshold table)")]
    UnknownScene(String),

    /// Feature name outside the recognized set.
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Feature extraction failed for an image.
    #[error("Feature computation failed: {path}: {reason}")]
    FeatureComputation {
        /// Path to the image whose vector could not be computed.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// File name carries no parsable quality-index token.
    #[error("Malformed file name (no quality index token): {0}")]
    MalformedFilename(PathBuf),

    /// Failed to load or decode an image file.
    #[error("Image load failed: {path}: {reason}")]
    ImageLoad {
        /// Path to the image that failed to load.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Error listing or interpreting a scene folder.
    #[error("Scene error: {0}")]
    Scene(String),

    /// Error writing a chart or report file.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
