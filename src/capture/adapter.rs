use super::events::{DetectionEvent, DetectionReceiver};
use super::handler::ScanHandler;
use super::overlay::{OverlayMap, OverlayRenderer};
use super::still::{ReviewOutcome, StillImageReview};
use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::models::{Barcode, CaptureSource, DetectedItem, ItemId, Point, Provenance, Size};
use crate::recognizer::RecognitionWorker;
use crate::selection::{FocusRegion, is_within_crosshair, select_closest, visible_items};
use std::path::PathBuf;

/// Platform camera pipeline controls
pub trait CameraSession {
    /// Start capturing; fails when the camera is denied or missing
    fn start(&mut self) -> Result<()>;
    /// Pause delivery while a modal is up
    fn pause(&mut self);
    /// Resume after [`pause`](Self::pause)
    fn resume(&mut self);
    /// Tear the session down
    fn stop(&mut self);
}

/// Camera that always starts and does nothing, for replaying recorded events
#[derive(Debug, Default)]
pub struct HeadlessCamera;

impl CameraSession for HeadlessCamera {
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn stop(&mut self) {}
}

/// Lifecycle of a live scanning session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Not mounted
    Idle,
    /// Camera running, events processed
    Scanning,
    /// A picker or review sheet is up; camera paused, events dropped
    Suspended,
    /// Camera failed to start; the host shows a fallback instead
    Unavailable(String),
}

/// Per-session glue between the camera pipeline, the selection logic and
/// the caller.
///
/// Everything here runs on one thread: the camera pipeline pushes events into
/// a [`DetectionReceiver`](super::events::DetectionReceiver) and the UI loop
/// calls [`drain`](Self::drain). Still-image recognition runs on the worker
/// and is collected with [`poll_recognition`](Self::poll_recognition).
pub struct CaptureAdapter<C, O, H> {
    config: ScannerConfig,
    camera: C,
    renderer: O,
    overlays: OverlayMap,
    handler: H,
    viewport: Size,
    focus: Option<FocusRegion>,
    state: SessionState,
    review: StillImageReview,
    worker: RecognitionWorker,
}

impl<C, O, H> CaptureAdapter<C, O, H>
where
    C: CameraSession,
    O: OverlayRenderer,
    H: ScanHandler,
{
    /// Create an unmounted adapter
    pub fn new(
        config: ScannerConfig,
        camera: C,
        renderer: O,
        handler: H,
        worker: RecognitionWorker,
    ) -> Self {
        let review = StillImageReview::new(config.auto_report_files);
        Self {
            config,
            camera,
            renderer,
            overlays: OverlayMap::new(),
            handler,
            viewport: Size::default(),
            focus: None,
            state: SessionState::Idle,
            review,
            worker,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Configuration in use
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Focus region for the current viewport, if one is configured
    pub fn focus_region(&self) -> Option<&FocusRegion> {
        self.focus.as_ref()
    }

    /// Center of the current viewport
    pub fn viewport_center(&self) -> Point {
        self.viewport.center()
    }

    /// Overlays currently drawn
    pub fn overlays(&self) -> &OverlayMap {
        &self.overlays
    }

    /// Still-image review flow
    pub fn review(&self) -> &StillImageReview {
        &self.review
    }

    /// Result handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Result handler, mutably
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Overlay renderer
    pub fn renderer(&self) -> &O {
        &self.renderer
    }

    /// Camera session
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Consume the adapter, returning the handler
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Start the session for a viewport of the given size
    pub fn mount(&mut self, viewport: Size) {
        if self.state != SessionState::Idle {
            tracing::debug!(state = ?self.state, "mount ignored; already mounted");
            return;
        }
        self.set_viewport(viewport);
        match self.camera.start() {
            Ok(()) => {
                tracing::info!(?viewport, "scanning started");
                self.state = SessionState::Scanning;
            }
            Err(err) => {
                tracing::warn!(error = %err, "camera unavailable");
                self.state = SessionState::Unavailable(err.to_string());
            }
        }
    }

    /// Stop the session and clear everything drawn
    pub fn unmount(&mut self) {
        if self.state == SessionState::Idle {
            return;
        }
        if !matches!(self.state, SessionState::Unavailable(_)) {
            self.camera.stop();
        }
        self.overlays.clear(&mut self.renderer);
        self.review.dismiss();
        self.state = SessionState::Idle;
        tracing::info!("scanning stopped");
    }

    /// Recompute the focus region for a new viewport size
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.focus = self
            .config
            .focus_size
            .map(|requested| FocusRegion::for_viewport(viewport, requested));
    }

    /// Pause scanning while a modal is shown
    pub fn suspend(&mut self) {
        if self.state == SessionState::Scanning {
            self.camera.pause();
            self.overlays.clear(&mut self.renderer);
            self.state = SessionState::Suspended;
            tracing::info!("scanning suspended");
        }
    }

    /// Resume scanning after the last modal closed
    pub fn resume(&mut self) {
        if self.state == SessionState::Suspended {
            self.camera.resume();
            self.state = SessionState::Scanning;
            tracing::info!("scanning resumed");
        }
    }

    /// Process every queued event without blocking. Returns how many were
    /// taken off the queue.
    pub fn drain(&mut self, events: &DetectionReceiver) -> usize {
        let mut count = 0;
        loop {
            match events.try_next() {
                Ok(Some(event)) => {
                    self.handle(event);
                    count += 1;
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::debug!(error = %err, "detection channel closed");
                    break;
                }
            }
        }
        count
    }

    /// Process a single event
    pub fn handle(&mut self, event: DetectionEvent) {
        if let DetectionEvent::ViewportChanged(size) = event {
            self.set_viewport(size);
            return;
        }
        if self.state != SessionState::Scanning {
            tracing::trace!(state = ?self.state, "event ignored");
            return;
        }

        match event {
            DetectionEvent::Added(items)
            | DetectionEvent::Updated(items)
            | DetectionEvent::Removed(items) => self.update_selection(&items),
            DetectionEvent::Tapped(item) => {
                tracing::debug!(id = %item.id, "item tapped");
                self.report_selection(Some(&item));
            }
            DetectionEvent::ViewportChanged(_) => {}
        }
    }

    fn update_selection(&mut self, items: &[DetectedItem]) {
        let visible = visible_items(items, self.focus.as_ref());
        let selected = select_closest(visible.iter().copied(), self.viewport_center());
        tracing::debug!(
            tracked = items.len(),
            visible = visible.len(),
            selected = ?selected.map(|i| i.id),
            "detection update"
        );
        self.report_selection(selected);
    }

    fn report_selection(&mut self, item: Option<&DetectedItem>) {
        let Some(item) = item else {
            self.overlays.clear(&mut self.renderer);
            self.handler.on_selection(None, false);
            return;
        };

        let centered = is_within_crosshair(item, self.viewport_center());
        if self.config.highlight_selected {
            self.overlays
                .show_only(&mut self.renderer, item.id, &item.bounds.normalized());
        } else {
            self.overlays.clear(&mut self.renderer);
        }

        let barcode = Barcode::from_item(item, Provenance::Camera { centered });
        self.handler.on_selection(Some(&barcode), centered);
        self.handler
            .on_capture(CaptureSource::Camera, std::slice::from_ref(&barcode));
    }

    /// The media picker was opened
    pub fn open_picker(&mut self) {
        self.suspend();
    }

    /// The media picker was closed without a pick in progress
    pub fn close_picker(&mut self) {
        if !self.review.is_active() {
            self.resume();
        }
    }

    /// Start recognizing a picked file in the background.
    ///
    /// Fails with [`ScanError::Busy`] while a previous pick is still being
    /// recognized or reviewed.
    pub fn pick_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        // A dismissed job still holds the worker until its result is collected.
        if self.worker.in_flight().is_some() {
            return Err(ScanError::Busy);
        }
        self.review.begin()?;
        self.suspend();
        if let Err(err) = self.worker.submit(path.into()) {
            self.review.dismiss();
            return Err(err);
        }
        Ok(())
    }

    /// Collect a finished recognition, if any. Returns what it led to.
    pub fn poll_recognition(&mut self) -> Option<ReviewOutcome> {
        let outcome = self.worker.poll()?;
        Some(self.finish_recognition(outcome.result))
    }

    /// Block until the in-flight recognition finishes
    pub fn wait_recognition(&mut self) -> Option<ReviewOutcome> {
        let outcome = self.worker.wait()?;
        Some(self.finish_recognition(outcome.result))
    }

    fn finish_recognition(&mut self, result: Result<Vec<DetectedItem>>) -> ReviewOutcome {
        let outcome = self.review.complete(result, &mut self.handler);
        // On failure the picker stays up so the user can retry. A discarded
        // result leaves the session as the dismissal or unmount left it.
        if let ReviewOutcome::Reported(_) = outcome {
            self.resume();
        }
        outcome
    }

    /// Tap inside the review sheet, in normalized image coordinates
    pub fn tap_review(&mut self, p: Point) -> Option<ItemId> {
        self.review.tap(p).map(|item| item.id)
    }

    /// Report the tapped item and close the review sheet
    pub fn confirm_review(&mut self) -> Option<Barcode> {
        let barcode = self.review.confirm(&mut self.handler)?;
        self.resume();
        Some(barcode)
    }

    /// Close the review sheet without reporting
    pub fn dismiss_review(&mut self) {
        self.review.dismiss();
        self.resume();
    }
}

impl<C, O, H> std::fmt::Debug for CaptureAdapter<C, O, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureAdapter")
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field("focus", &self.focus)
            .field("overlays", &self.overlays.len())
            .finish()
    }
}
