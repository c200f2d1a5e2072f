use crate::models::{Barcode, CaptureSource};

/// Receives scan results.
///
/// Hosts implement whichever callback they need; both default to doing
/// nothing.
pub trait ScanHandler {
    /// A batch of results from the camera (always one item) or from a file
    fn on_capture(&mut self, _source: CaptureSource, _barcodes: &[Barcode]) {}

    /// Live-camera selection after every detection update. `None` means
    /// nothing is in view; `centered` is always false in that case.
    fn on_selection(&mut self, _barcode: Option<&Barcode>, _centered: bool) {}
}

/// A single recorded callback
#[derive(Debug, Clone, PartialEq)]
pub enum ScanReport {
    /// `on_capture` was called
    Capture(CaptureSource, Vec<Barcode>),
    /// `on_selection` was called
    Selection(Option<Barcode>, bool),
}

/// Handler that records every callback in order
#[derive(Debug, Default)]
pub struct ReportLog {
    /// Callbacks received so far
    pub reports: Vec<ScanReport>,
}

impl ReportLog {
    /// Every barcode delivered through `on_capture`
    pub fn captured(&self) -> Vec<&Barcode> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                ScanReport::Capture(_, barcodes) => Some(barcodes.iter()),
                ScanReport::Selection(..) => None,
            })
            .flatten()
            .collect()
    }

    /// Most recent `on_selection` call
    pub fn last_selection(&self) -> Option<(Option<&Barcode>, bool)> {
        self.reports.iter().rev().find_map(|r| match r {
            ScanReport::Selection(b, centered) => Some((b.as_ref(), *centered)),
            ScanReport::Capture(..) => None,
        })
    }
}

impl ScanHandler for ReportLog {
    fn on_capture(&mut self, source: CaptureSource, barcodes: &[Barcode]) {
        self.reports
            .push(ScanReport::Capture(source, barcodes.to_vec()));
    }

    fn on_selection(&mut self, barcode: Option<&Barcode>, centered: bool) {
        self.reports
            .push(ScanReport::Selection(barcode.cloned(), centered));
    }
}
