use crate::error::{Result, ScanError};
use crate::models::{DetectedItem, Size};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Receiver, SyncSender, TryRecvError, TrySendError, sync_channel};

/// Event emitted by the live camera pipeline.
///
/// Batch variants carry the complete set of currently tracked items, not a
/// delta, so any one of them is enough to rebuild the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DetectionEvent {
    /// New items started being tracked
    Added(Vec<DetectedItem>),
    /// Tracked items moved or changed
    Updated(Vec<DetectedItem>),
    /// Items stopped being tracked
    Removed(Vec<DetectedItem>),
    /// User tapped an item in the preview
    Tapped(DetectedItem),
    /// Viewport was resized (e.g. device rotation)
    ViewportChanged(Size),
}

impl DetectionEvent {
    /// Full tracked set for batch events
    pub fn items(&self) -> Option<&[DetectedItem]> {
        match self {
            DetectionEvent::Added(items)
            | DetectionEvent::Updated(items)
            | DetectionEvent::Removed(items) => Some(items),
            DetectionEvent::Tapped(_) | DetectionEvent::ViewportChanged(_) => None,
        }
    }
}

/// Producer half handed to the camera pipeline
#[derive(Debug, Clone)]
pub struct DetectionSender {
    tx: SyncSender<DetectionEvent>,
}

/// Consumer half, drained on the UI thread
#[derive(Debug)]
pub struct DetectionReceiver {
    rx: Receiver<DetectionEvent>,
}

/// Bounded channel between the camera pipeline and the capture adapter
pub fn detection_channel(capacity: usize) -> (DetectionSender, DetectionReceiver) {
    let (tx, rx) = sync_channel(capacity.max(1));
    (DetectionSender { tx }, DetectionReceiver { rx })
}

impl DetectionSender {
    /// Queue an event without blocking the producer.
    ///
    /// Returns `Ok(false)` when the queue is full and the event was dropped.
    /// Snapshots supersede each other, so losing one only delays the update.
    pub fn emit(&self, event: DetectionEvent) -> Result<bool> {
        match self.tx.try_send(event) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(event)) => {
                tracing::trace!(?event, "detection queue full; dropping snapshot");
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => Err(ScanError::ChannelClosed),
        }
    }
}

impl DetectionReceiver {
    /// Next pending event, if any
    pub fn try_next(&self) -> Result<Option<DetectionEvent>> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ScanError::ChannelClosed),
        }
    }

    /// Block until the next event; `None` once every sender is gone
    pub fn recv(&self) -> Option<DetectionEvent> {
        self.rx.recv().ok()
    }
}
