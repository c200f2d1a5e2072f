use super::handler::ScanHandler;
use crate::error::{Result, ScanError};
use crate::models::{Barcode, CaptureSource, DetectedItem, Point, Provenance};
use crate::selection::hit_test;

/// Where the still-image review sheet is
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewState {
    /// No image being handled
    Idle,
    /// Recognition is running in the background
    Recognizing,
    /// Detections are on screen, waiting for the user
    Reviewing {
        /// Every detection in the image
        items: Vec<DetectedItem>,
        /// Index of the tapped item awaiting confirmation
        selected: Option<usize>,
    },
}

/// What a finished recognition led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Every detection was reported and the sheet closed
    Reported(usize),
    /// Detections are shown and wait for a tap plus confirmation
    AwaitingSelection(usize),
    /// Recognition failed; nothing was reported
    Failed,
    /// The sheet was dismissed before the result arrived; it was dropped
    Discarded,
}

/// Image-review flow for one picked file at a time
#[derive(Debug)]
pub struct StillImageReview {
    state: ReviewState,
    auto_report: bool,
}

impl StillImageReview {
    /// Create an idle review flow
    pub fn new(auto_report: bool) -> Self {
        Self {
            state: ReviewState::Idle,
            auto_report,
        }
    }

    /// Current state
    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    /// True while recognizing or reviewing
    pub fn is_active(&self) -> bool {
        self.state != ReviewState::Idle
    }

    /// Detections on screen
    pub fn items(&self) -> &[DetectedItem] {
        match &self.state {
            ReviewState::Reviewing { items, .. } => items,
            _ => &[],
        }
    }

    /// Item tapped and awaiting confirmation
    pub fn selected(&self) -> Option<&DetectedItem> {
        match &self.state {
            ReviewState::Reviewing {
                items,
                selected: Some(i),
            } => items.get(*i),
            _ => None,
        }
    }

    /// Mark a recognition as started. Only one may run at a time.
    pub fn begin(&mut self) -> Result<()> {
        if self.is_active() {
            return Err(ScanError::Busy);
        }
        self.state = ReviewState::Recognizing;
        Ok(())
    }

    /// Feed the recognition result in.
    ///
    /// Only a pending recognition accepts a result. Anything arriving after
    /// [`dismiss`](Self::dismiss) is dropped without reaching `handler`.
    pub fn complete(
        &mut self,
        result: Result<Vec<DetectedItem>>,
        handler: &mut impl ScanHandler,
    ) -> ReviewOutcome {
        if self.state != ReviewState::Recognizing {
            tracing::debug!(state = ?self.state, "dropping result for a dismissed sheet");
            return ReviewOutcome::Discarded;
        }

        let items = match result {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, "still-image recognition failed");
                self.state = ReviewState::Idle;
                return ReviewOutcome::Failed;
            }
        };

        if self.auto_report {
            let barcodes: Vec<Barcode> = items
                .iter()
                .map(|item| Barcode::from_item(item, Provenance::File))
                .collect();
            if barcodes.is_empty() {
                tracing::info!("no codes found in picked file");
            } else {
                handler.on_capture(CaptureSource::File, &barcodes);
            }
            self.state = ReviewState::Idle;
            return ReviewOutcome::Reported(barcodes.len());
        }

        let count = items.len();
        self.state = ReviewState::Reviewing {
            items,
            selected: None,
        };
        ReviewOutcome::AwaitingSelection(count)
    }

    /// Select the item under `p` (normalized image coordinates).
    ///
    /// A tap that misses every item clears the pending selection.
    pub fn tap(&mut self, p: Point) -> Option<&DetectedItem> {
        let ReviewState::Reviewing { items, selected } = &mut self.state else {
            return None;
        };
        *selected = hit_test(items, p);
        let items: &Vec<DetectedItem> = items;
        selected.and_then(move |i| items.get(i))
    }

    /// Report the tapped item and close the sheet.
    ///
    /// Returns `None` (and keeps the sheet open) when nothing is selected.
    pub fn confirm(&mut self, handler: &mut impl ScanHandler) -> Option<Barcode> {
        let barcode = Barcode::from_item(self.selected()?, Provenance::File);
        handler.on_capture(CaptureSource::File, std::slice::from_ref(&barcode));
        self.state = ReviewState::Idle;
        Some(barcode)
    }

    /// Close the sheet without reporting
    pub fn dismiss(&mut self) {
        self.state = ReviewState::Idle;
    }
}
