//! Live-camera and still-image integration
//!
//! The camera pipeline and the still-image recognizer are external; this
//! module consumes their output and drives the selection logic:
//! - Detection events and their bounded channel
//! - Per-session overlay bookkeeping
//! - The capture adapter state machine
//! - The still-image review sheet
//! - Result callbacks

/// Capture adapter and camera session seam
pub mod adapter;
/// Detection events and channel
pub mod events;
/// Result callbacks
pub mod handler;
/// Overlay drawing seam and bookkeeping
pub mod overlay;
/// Still-image review flow
pub mod still;

pub use adapter::{CameraSession, CaptureAdapter, HeadlessCamera, SessionState};
pub use events::{DetectionEvent, DetectionReceiver, DetectionSender, detection_channel};
pub use handler::{ReportLog, ScanHandler, ScanReport};
pub use overlay::{NoOverlay, OverlayHandle, OverlayMap, OverlayRenderer};
pub use still::{ReviewOutcome, ReviewState, StillImageReview};
