use center_scan::capture::{
    CaptureAdapter, DetectionEvent, HeadlessCamera, NoOverlay, ReportLog, ScanReport,
    detection_channel,
};
use center_scan::models::{
    CaptureSource, DetectedItem, ItemId, Point, Provenance, QuadBounds, Size, Symbology,
    SymbologyKind,
};
use center_scan::recognizer::{QrRecognizer, RecognitionWorker};
use center_scan::{ScannerConfig, SessionState};
use std::sync::Arc;

type Session = CaptureAdapter<HeadlessCamera, NoOverlay, ReportLog>;

fn session(config: ScannerConfig, viewport: Size) -> Session {
    let worker = RecognitionWorker::new(Arc::new(QrRecognizer::new()));
    let mut adapter = CaptureAdapter::new(
        config,
        HeadlessCamera,
        NoOverlay::default(),
        ReportLog::default(),
        worker,
    );
    adapter.mount(viewport);
    assert_eq!(adapter.state(), &SessionState::Scanning);
    adapter
}

fn unfocused() -> ScannerConfig {
    ScannerConfig {
        focus_size: None,
        ..ScannerConfig::default()
    }
}

/// Square item of side `side` centered on (`cx`, `cy`)
fn code(id: u64, cx: f32, cy: f32, side: f32) -> DetectedItem {
    let half = side / 2.0;
    DetectedItem::barcode(
        ItemId(id),
        QuadBounds::from_rect(cx - half, cy - half, side, side),
        Symbology::Known(SymbologyKind::Qr),
        Some(format!("payload-{id}")),
    )
}

#[test]
fn test_closest_item_to_center_is_selected_and_centered() {
    // Viewport center is (100, 100).
    let mut adapter = session(unfocused(), Size::new(200.0, 200.0));
    adapter.handle(DetectionEvent::Updated(vec![
        code(1, 150.0, 100.0, 20.0),
        code(2, 102.0, 98.0, 20.0),
        code(3, 100.0, 180.0, 20.0),
    ]));

    let (selected, centered) = adapter.handler().last_selection().unwrap();
    assert_eq!(selected.map(|b| b.id()), Some(ItemId(2)));
    assert!(centered);

    let captured = adapter.handler().captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].payload(), Some("payload-2"));
    assert_eq!(captured[0].provenance(), Provenance::Camera { centered: true });
}

#[test]
fn test_selection_away_from_crosshair_is_not_centered() {
    let mut adapter = session(unfocused(), Size::new(200.0, 200.0));
    adapter.handle(DetectionEvent::Added(vec![code(7, 160.0, 40.0, 20.0)]));

    let (selected, centered) = adapter.handler().last_selection().unwrap();
    assert_eq!(selected.map(|b| b.id()), Some(ItemId(7)));
    assert!(!centered);
    assert!(!adapter.handler().captured()[0].is_centered());
}

#[test]
fn test_empty_set_reports_no_selection() {
    let mut adapter = session(ScannerConfig::default(), Size::new(400.0, 400.0));
    adapter.handle(DetectionEvent::Added(vec![code(1, 200.0, 200.0, 40.0)]));
    assert_eq!(adapter.overlays().len(), 1);

    adapter.handle(DetectionEvent::Removed(Vec::new()));
    assert_eq!(adapter.handler().last_selection(), Some((None, false)));
    assert!(adapter.overlays().is_empty());
    // No capture for an empty update.
    assert_eq!(adapter.handler().captured().len(), 1);
}

#[test]
fn test_focus_region_filters_out_items_outside() {
    // 400x400 viewport, 200x200 region spanning 100..300 on both axes.
    let mut adapter = session(ScannerConfig::default(), Size::new(400.0, 400.0));
    adapter.handle(DetectionEvent::Updated(vec![
        code(1, 30.0, 30.0, 20.0),
        code(2, 260.0, 260.0, 20.0),
    ]));

    let (selected, centered) = adapter.handler().last_selection().unwrap();
    assert_eq!(selected.map(|b| b.id()), Some(ItemId(2)));
    assert!(!centered);
}

#[test]
fn test_touching_the_focus_edge_is_not_visible() {
    let mut adapter = session(ScannerConfig::default(), Size::new(400.0, 400.0));
    // Right edge at x=100 and left edge at x=300: both only touch the region.
    adapter.handle(DetectionEvent::Updated(vec![
        code(1, 80.0, 200.0, 40.0),
        code(2, 320.0, 200.0, 40.0),
    ]));
    assert_eq!(adapter.handler().last_selection(), Some((None, false)));
    assert!(adapter.handler().captured().is_empty());
}

#[test]
fn test_tap_overrides_center_selection() {
    let mut adapter = session(ScannerConfig::default(), Size::new(400.0, 400.0));
    let far = code(9, 30.0, 30.0, 20.0);
    adapter.handle(DetectionEvent::Updated(vec![code(1, 200.0, 200.0, 40.0), far.clone()]));
    adapter.handle(DetectionEvent::Tapped(far));

    let (selected, centered) = adapter.handler().last_selection().unwrap();
    assert_eq!(selected.map(|b| b.id()), Some(ItemId(9)));
    assert!(!centered);
    assert_eq!(adapter.overlays().len(), 1);
    assert!(adapter.overlays().get(ItemId(9)).is_some());
    assert!(adapter.overlays().get(ItemId(1)).is_none());
}

#[test]
fn test_rotated_item_is_tested_in_upright_form() {
    let mut adapter = session(ScannerConfig::default(), Size::new(400.0, 400.0));
    // Upside-down labels on a box covering the viewport center.
    let upright = QuadBounds::from_rect(180.0, 190.0, 40.0, 20.0);
    let rotated = QuadBounds::new(
        upright.bottom_right,
        upright.bottom_left,
        upright.top_right,
        upright.top_left,
    );
    adapter.handle(DetectionEvent::Added(vec![DetectedItem::text(
        ItemId(4),
        rotated,
        "upside down",
    )]));

    let (selected, centered) = adapter.handler().last_selection().unwrap();
    let selected = selected.unwrap();
    assert_eq!(selected.id(), ItemId(4));
    assert_eq!(selected.payload(), Some("upside down"));
    assert!(centered);
}

#[test]
fn test_events_flow_through_the_channel() {
    let config = ScannerConfig {
        event_capacity: 2,
        ..ScannerConfig::default()
    };
    let (tx, rx) = detection_channel(config.event_capacity);
    let mut adapter = session(config, Size::new(400.0, 400.0));

    assert!(tx.emit(DetectionEvent::Added(vec![code(1, 260.0, 260.0, 20.0)])).unwrap());
    assert!(tx.emit(DetectionEvent::Updated(vec![code(1, 205.0, 200.0, 20.0)])).unwrap());
    // Queue is full; the newest snapshot is dropped.
    assert!(!tx.emit(DetectionEvent::Removed(Vec::new())).unwrap());

    assert_eq!(adapter.drain(&rx), 2);
    let selections: Vec<bool> = adapter
        .handler()
        .reports
        .iter()
        .filter_map(|r| match r {
            ScanReport::Selection(Some(_), centered) => Some(*centered),
            _ => None,
        })
        .collect();
    assert_eq!(selections, vec![false, true]);
    assert!(
        adapter
            .handler()
            .reports
            .iter()
            .all(|r| !matches!(r, ScanReport::Capture(CaptureSource::File, _)))
    );

    drop(tx);
    assert_eq!(adapter.drain(&rx), 0);
}

#[test]
fn test_viewport_center_follows_resizes() {
    let mut adapter = session(unfocused(), Size::new(200.0, 200.0));
    adapter.handle(DetectionEvent::ViewportChanged(Size::new(600.0, 200.0)));
    assert_eq!(adapter.viewport_center(), Point::new(300.0, 100.0));

    adapter.handle(DetectionEvent::Updated(vec![
        code(1, 100.0, 100.0, 20.0),
        code(2, 290.0, 100.0, 20.0),
    ]));
    let (selected, _) = adapter.handler().last_selection().unwrap();
    assert_eq!(selected.map(|b| b.id()), Some(ItemId(2)));
}
