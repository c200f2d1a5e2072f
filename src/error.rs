//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by file loading, recognition and session plumbing.
///
/// None of these reach the result callbacks; the capture layer logs them and
/// reports nothing instead.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Camera session could not start (permission denied, no device)
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    /// File extension is neither an image format nor PDF
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Reading a file failed
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Image bytes could not be decoded
    #[error("image decode failed: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// PDF page could not be rendered
    #[error("pdf render failed: {0}")]
    PdfRender(String),

    /// The recognizer itself failed (including a panic inside it)
    #[error("recognition failed: {0}")]
    Recognition(String),

    /// A recognition is already in flight
    #[error("a recognition is already in progress")]
    Busy,

    /// The other end of a channel went away
    #[error("channel closed")]
    ChannelClosed,

    /// Configuration could not be loaded or saved
    #[error("config error: {0}")]
    Config(String),
}

/// Result alias used across the crate
pub type Result<T, E = ScanError> = std::result::Result<T, E>;
