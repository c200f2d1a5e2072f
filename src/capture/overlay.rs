use crate::models::{ItemId, QuadBounds};
use std::collections::HashMap;

/// Opaque handle to a drawn overlay, issued by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Host-side drawing of highlight boxes over the preview
pub trait OverlayRenderer {
    /// Draw a box along `quad` (already upright) and return its handle
    fn draw(&mut self, quad: &QuadBounds) -> OverlayHandle;

    /// Remove a previously drawn box
    fn remove(&mut self, handle: OverlayHandle);
}

/// Renderer that draws nothing, for headless sessions
#[derive(Debug, Default)]
pub struct NoOverlay {
    next: u64,
}

impl OverlayRenderer for NoOverlay {
    fn draw(&mut self, _quad: &QuadBounds) -> OverlayHandle {
        self.next += 1;
        OverlayHandle(self.next)
    }

    fn remove(&mut self, _handle: OverlayHandle) {}
}

/// Overlays currently on screen, keyed by detection.
///
/// Owned by one capture session and only touched from the UI thread. It is
/// cleared and rebuilt on every detection update rather than diffed.
#[derive(Debug, Default)]
pub struct OverlayMap {
    drawn: HashMap<ItemId, OverlayHandle>,
}

impl OverlayMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every drawn overlay
    pub fn clear(&mut self, renderer: &mut impl OverlayRenderer) {
        for (_, handle) in self.drawn.drain() {
            renderer.remove(handle);
        }
    }

    /// Clear, then draw a single overlay for `id`
    pub fn show_only(&mut self, renderer: &mut impl OverlayRenderer, id: ItemId, quad: &QuadBounds) {
        self.clear(renderer);
        let handle = renderer.draw(quad);
        self.drawn.insert(id, handle);
    }

    /// Handle drawn for `id`, if any
    pub fn get(&self, id: ItemId) -> Option<OverlayHandle> {
        self.drawn.get(&id).copied()
    }

    /// Number of overlays on screen
    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    /// True when nothing is drawn
    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }
}
