use crate::capture::DetectionEvent;
use crate::models::Size;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions picked up when walking a directory for scanning
pub const SCANNABLE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "bmp", "webp", "pdf"];

/// Parse a `WIDTHxHEIGHT` viewport string such as `390x844`.
pub fn parse_viewport(s: &str) -> Option<Size> {
    let (w, h) = s.trim().split_once(['x', 'X'])?;
    let width = w.trim().parse::<f32>().ok()?;
    let height = h.trim().parse::<f32>().ok()?;
    if width > 0.0 && height > 0.0 {
        Some(Size::new(width, height))
    } else {
        None
    }
}

/// Load a recorded JSON list of detection events.
pub fn load_event_script<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<DetectionEvent>> {
    use anyhow::Context;

    let path = path.as_ref();
    let json = fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
    let events = serde_json::from_str(&json).with_context(|| format!("parse {:?}", path))?;
    Ok(events)
}

/// Iterate scannable files under `root`, sorted, optionally truncated.
pub fn scan_dir_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut files = collect_files(root.as_ref());
    files.sort();
    if let Some(limit) = limit {
        files.truncate(limit);
    }
    files.into_iter()
}

fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut files = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(dir = %dir.display(), error = %err, "skipping unreadable directory");
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if SCANNABLE_EXTENSIONS.contains(&ext.as_str()) {
                    files.push(path);
                }
            }
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DetectedItem, ItemId, QuadBounds};
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let mut path = std::env::temp_dir();
        let sequence = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        path.push(format!("center_scan_tools_{}_{sequence}", std::process::id()));
        fs::create_dir_all(&path).expect("failed to create temp dir");
        path
    }

    #[test]
    fn parse_viewport_accepts_both_separators() {
        assert_eq!(parse_viewport("390x844"), Some(Size::new(390.0, 844.0)));
        assert_eq!(parse_viewport(" 1024 X 768 "), Some(Size::new(1024.0, 768.0)));
        assert_eq!(parse_viewport("0x10"), None);
        assert_eq!(parse_viewport("wide"), None);
    }

    #[test]
    fn scan_dir_filters_and_sorts() {
        let root = temp_dir();
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("b.png"), b"").unwrap();
        fs::write(root.join("a.PDF"), b"").unwrap();
        fs::write(root.join("notes.txt"), b"").unwrap();
        fs::write(root.join("nested/c.jpg"), b"").unwrap();

        let files: Vec<PathBuf> = scan_dir_iter(&root, None).collect();
        assert_eq!(
            files,
            vec![root.join("a.PDF"), root.join("b.png"), root.join("nested/c.jpg")]
        );
        assert_eq!(scan_dir_iter(&root, Some(1)).count(), 1);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn load_event_script_round_trips() {
        let root = temp_dir();
        let path = root.join("events.json");
        let events = vec![
            DetectionEvent::ViewportChanged(Size::new(400.0, 400.0)),
            DetectionEvent::Added(vec![DetectedItem::text(
                ItemId(1),
                QuadBounds::from_rect(180.0, 180.0, 40.0, 40.0),
                "hello",
            )]),
        ];
        fs::write(&path, serde_json::to_string(&events).unwrap()).unwrap();
        assert_eq!(load_event_script(&path).unwrap(), events);
        assert!(load_event_script(root.join("missing.json")).is_err());
        let _ = fs::remove_dir_all(root);
    }
}
