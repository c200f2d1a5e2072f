//! center_scan - pick the barcode the user is pointing at
//!
//! Takes detections from a live camera pipeline or a still-image recognizer,
//! restricts them to a focus region, picks the one closest to the viewport
//! center and reports it as a small [`Barcode`] value.
//!
//! The geometry lives in [`selection`] and is pure. [`capture`] wires it to
//! the camera and to callers, and [`recognizer`] turns image files into
//! detections.
//!
//! # Example
//! ```
//! use center_scan::models::{DetectedItem, ItemId, Point, QuadBounds};
//! use center_scan::selection::{is_within_crosshair, select_closest};
//!
//! let center = Point::new(100.0, 100.0);
//! let items = vec![
//!     DetectedItem::text(ItemId(1), QuadBounds::from_rect(80.0, 80.0, 40.0, 40.0), "near"),
//!     DetectedItem::text(ItemId(2), QuadBounds::from_rect(180.0, 180.0, 40.0, 40.0), "far"),
//! ];
//! let picked = select_closest(&items, center).unwrap();
//! assert_eq!(picked.id, ItemId(1));
//! assert!(is_within_crosshair(picked, center));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Live-camera and still-image integration
pub mod capture;
/// Scanner configuration
pub mod config;
/// Error types
pub mod error;
/// Core data structures (Point, QuadBounds, Barcode, etc.)
pub mod models;
/// Still-image recognition
pub mod recognizer;
/// Geometry and selection
pub mod selection;
/// Helpers for the command-line tool
pub mod tools;

pub use capture::{CaptureAdapter, DetectionEvent, ScanHandler, SessionState};
pub use config::ScannerConfig;
pub use error::{Result, ScanError};
pub use models::{
    AxisAlignedBox, Barcode, CaptureSource, DetectedItem, ItemId, Point, Provenance, QuadBounds,
    Rotation, Size, Symbology, SymbologyKind,
};
pub use recognizer::{BarcodeRecognizer, PdfRasterizer, QrRecognizer};
