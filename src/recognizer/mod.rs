//! Still-image recognition
//!
//! This module turns files into detections:
//! - File classification (image formats vs. PDF)
//! - Loading and PDF first-page rasterization
//! - The recognizer seam and its rqrr-backed QR implementation
//! - A background worker that keeps recognition off the UI thread

/// rqrr-backed QR recognizer
pub mod qr;
/// Background recognition worker
pub mod worker;

pub use qr::QrRecognizer;
pub use worker::{RecognitionOutcome, RecognitionWorker};

use crate::error::{Result, ScanError};
use crate::models::DetectedItem;
use image::{DynamicImage, ImageFormat};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// One-shot detector for a still image
pub trait BarcodeRecognizer: Send + Sync {
    /// Detect every item in `image`. Bounds are normalized to `[0, 1]`
    /// image space with a top-left origin.
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<DetectedItem>>;
}

/// Renders the first page of a PDF document
pub trait PdfRasterizer: Send + Sync {
    /// Rasterize page 1 of the document in `bytes`
    fn render_first_page(&self, bytes: &[u8]) -> Result<DynamicImage>;
}

/// Kind of file accepted for still-image scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileInput {
    /// A raster image the `image` crate knows by extension
    Image(ImageFormat),
    /// A PDF document; only the first page is scanned
    Pdf,
}

impl FileInput {
    /// Classify `path` by its extension
    pub fn classify(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ScanError::UnsupportedFileType(path.display().to_string()))?;

        if ext == "pdf" {
            return Ok(FileInput::Pdf);
        }
        ImageFormat::from_extension(&ext)
            .map(FileInput::Image)
            .ok_or(ScanError::UnsupportedFileType(ext))
    }
}

/// Load `path` as an image, rasterizing PDFs with `rasterizer`
pub fn load_file(path: &Path, rasterizer: Option<&dyn PdfRasterizer>) -> Result<DynamicImage> {
    let input = FileInput::classify(path)?;
    let bytes = fs::read(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match input {
        FileInput::Image(format) => Ok(image::load_from_memory_with_format(&bytes, format)?),
        FileInput::Pdf => rasterizer
            .ok_or_else(|| ScanError::PdfRender("no PDF rasterizer installed".to_string()))?
            .render_first_page(&bytes),
    }
}

/// Load and recognize a single file
pub fn recognize_file<R>(
    path: &Path,
    recognizer: &R,
    rasterizer: Option<&dyn PdfRasterizer>,
) -> Result<Vec<DetectedItem>>
where
    R: BarcodeRecognizer + ?Sized,
{
    let image = load_file(path, rasterizer)?;
    let items = recognizer.recognize(&image)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        found = items.len(),
        "recognized file"
    );
    Ok(items)
}

/// Recognize many files in parallel. Results keep the input order.
pub fn recognize_batch<R>(
    paths: &[PathBuf],
    recognizer: &R,
    rasterizer: Option<&dyn PdfRasterizer>,
) -> Vec<(PathBuf, Result<Vec<DetectedItem>>)>
where
    R: BarcodeRecognizer + ?Sized,
{
    paths
        .par_iter()
        .map(|path| (path.clone(), recognize_file(path, recognizer, rasterizer)))
        .collect()
}
