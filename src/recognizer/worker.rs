use super::{BarcodeRecognizer, PdfRasterizer, recognize_file};
use crate::error::{Result, ScanError};
use crate::models::DetectedItem;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

/// Result of one background recognition
#[derive(Debug)]
pub struct RecognitionOutcome {
    /// File that was scanned
    pub path: PathBuf,
    /// Detections, or why there are none
    pub result: Result<Vec<DetectedItem>>,
}

/// Runs file recognition on the rayon pool, one job at a time.
///
/// Completed jobs wait in a channel until the UI thread calls
/// [`poll`](Self::poll). A job cannot be cancelled once submitted.
pub struct RecognitionWorker {
    recognizer: Arc<dyn BarcodeRecognizer>,
    rasterizer: Option<Arc<dyn PdfRasterizer>>,
    tx: Sender<RecognitionOutcome>,
    rx: Receiver<RecognitionOutcome>,
    in_flight: Option<PathBuf>,
}

impl RecognitionWorker {
    /// Worker without PDF support
    pub fn new(recognizer: Arc<dyn BarcodeRecognizer>) -> Self {
        let (tx, rx) = channel();
        Self {
            recognizer,
            rasterizer: None,
            tx,
            rx,
            in_flight: None,
        }
    }

    /// Enable PDF input
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn PdfRasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    /// File currently being recognized
    pub fn in_flight(&self) -> Option<&PathBuf> {
        self.in_flight.as_ref()
    }

    /// Start recognizing `path` in the background
    pub fn submit(&mut self, path: PathBuf) -> Result<()> {
        if self.in_flight.is_some() {
            return Err(ScanError::Busy);
        }
        self.in_flight = Some(path.clone());

        let recognizer = Arc::clone(&self.recognizer);
        let rasterizer = self.rasterizer.clone();
        let tx = self.tx.clone();
        rayon::spawn(move || {
            // A panic must not reach rayon, which aborts the process on one.
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                recognize_file(&path, recognizer.as_ref(), rasterizer.as_deref())
            }))
            .unwrap_or_else(|payload| {
                let message = panic_message(payload.as_ref());
                tracing::error!(path = %path.display(), %message, "recognizer panicked");
                Err(ScanError::Recognition(message))
            });
            // The worker owns the receiver, so this only fails after it is dropped.
            let _ = tx.send(RecognitionOutcome { path, result });
        });
        Ok(())
    }

    /// Collect a finished job without blocking
    pub fn poll(&mut self) -> Option<RecognitionOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.in_flight = None;
                Some(outcome)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the in-flight job finishes; `None` if nothing was submitted
    pub fn wait(&mut self) -> Option<RecognitionOutcome> {
        self.in_flight.as_ref()?;
        let outcome = self.rx.recv().ok()?;
        self.in_flight = None;
        Some(outcome)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

impl std::fmt::Debug for RecognitionWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognitionWorker")
            .field("pdf", &self.rasterizer.is_some())
            .field("in_flight", &self.in_flight)
            .finish()
    }
}
