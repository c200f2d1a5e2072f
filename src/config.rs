//! Scanner configuration.
//!
//! Every field is optional in the on-disk JSON; missing fields take their
//! defaults. A handful of `CENTER_SCAN_*` environment variables can override
//! the loaded values for quick experiments.

use crate::error::{Result, ScanError};
use crate::models::Size;
use crate::selection::focus::DEFAULT_FOCUS_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Where hosts should place the media-picker button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerAlignment {
    /// Top, leading edge
    TopLeading,
    /// Top, centered
    Top,
    /// Top, trailing edge
    TopTrailing,
    /// Bottom, leading edge
    BottomLeading,
    /// Bottom, centered
    Bottom,
    /// Bottom, trailing edge
    #[default]
    BottomTrailing,
}

/// Caller-supplied scanner options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Requested focus region size; `None` disables focus filtering
    pub focus_size: Option<Size>,
    /// Hosts draw the center target icon
    pub show_target: bool,
    /// Draw an overlay box around the selected camera item
    pub highlight_selected: bool,
    /// Report every still-image detection at once instead of asking the
    /// user to pick one
    pub auto_report_files: bool,
    /// Placement hint for the media-picker trigger
    pub picker_alignment: PickerAlignment,
    /// Capacity of the detection event channel
    pub event_capacity: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            focus_size: Some(DEFAULT_FOCUS_SIZE),
            show_target: true,
            highlight_selected: true,
            auto_report_files: false,
            picker_alignment: PickerAlignment::default(),
            event_capacity: 16,
        }
    }
}

impl ScannerConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|e| ScanError::Config(format!("parse {path:?}: {e}")))
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load config; using defaults");
                Self::default()
            }
        }
    }

    /// Save configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::Config(format!("serialize config: {e}")))?;
        fs::write(path, json).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `CENTER_SCAN_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let width = lookup("CENTER_SCAN_FOCUS_WIDTH");
        let height = lookup("CENTER_SCAN_FOCUS_HEIGHT");
        if width.is_some() || height.is_some() {
            let base = self.focus_size.unwrap_or(DEFAULT_FOCUS_SIZE);
            let size = Size::new(parse_f32(width, base.width), parse_f32(height, base.height));
            // A non-positive side turns the region off.
            self.focus_size = (size.width > 0.0 && size.height > 0.0).then_some(size);
        }

        self.auto_report_files = parse_bool(lookup("CENTER_SCAN_AUTO_REPORT"), self.auto_report_files);
        self.highlight_selected = parse_bool(lookup("CENTER_SCAN_HIGHLIGHT"), self.highlight_selected);
        self.show_target = parse_bool(lookup("CENTER_SCAN_SHOW_TARGET"), self.show_target);
        self
    }
}

fn parse_f32(value: Option<String>, default: f32) -> f32 {
    value
        .and_then(|v| v.trim().parse::<f32>().ok())
        .unwrap_or(default)
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("TRUE") | Some("yes") | Some("YES") => true,
        Some("0") | Some("false") | Some("FALSE") | Some("no") | Some("NO") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = ScannerConfig::default();
        assert_eq!(cfg.focus_size, Some(Size::new(200.0, 200.0)));
        assert!(cfg.show_target);
        assert!(cfg.highlight_selected);
        assert!(!cfg.auto_report_files);
        assert_eq!(cfg.picker_alignment, PickerAlignment::BottomTrailing);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: ScannerConfig =
            serde_json::from_str(r#"{ "auto_report_files": true, "picker_alignment": "top" }"#)
                .unwrap();
        assert!(cfg.auto_report_files);
        assert_eq!(cfg.picker_alignment, PickerAlignment::Top);
        assert_eq!(cfg.focus_size, Some(DEFAULT_FOCUS_SIZE));
    }

    #[test]
    fn test_null_focus_disables_region() {
        let cfg: ScannerConfig = serde_json::from_str(r#"{ "focus_size": null }"#).unwrap();
        assert_eq!(cfg.focus_size, None);
    }

    #[test]
    fn test_env_overrides() {
        let cfg = ScannerConfig::default().with_overrides(lookup(&[
            ("CENTER_SCAN_FOCUS_WIDTH", "320"),
            ("CENTER_SCAN_AUTO_REPORT", "1"),
            ("CENTER_SCAN_HIGHLIGHT", "no"),
            ("CENTER_SCAN_SHOW_TARGET", "garbage"),
        ]));
        assert_eq!(cfg.focus_size, Some(Size::new(320.0, 200.0)));
        assert!(cfg.auto_report_files);
        assert!(!cfg.highlight_selected);
        assert!(cfg.show_target);
    }

    #[test]
    fn test_env_zero_width_disables_focus() {
        let cfg = ScannerConfig::default()
            .with_overrides(lookup(&[("CENTER_SCAN_FOCUS_WIDTH", "0")]));
        assert_eq!(cfg.focus_size, None);
    }

    #[test]
    fn test_env_leaves_disabled_focus_alone() {
        let cfg = ScannerConfig {
            focus_size: None,
            ..ScannerConfig::default()
        }
        .with_overrides(lookup(&[]));
        assert_eq!(cfg.focus_size, None);
    }

    #[test]
    fn test_save_and_load() {
        let mut path = std::env::temp_dir();
        path.push(format!("center_scan_config_{}.json", std::process::id()));
        let cfg = ScannerConfig {
            auto_report_files: true,
            focus_size: Some(Size::new(120.0, 80.0)),
            ..ScannerConfig::default()
        };
        cfg.save(&path).unwrap();
        assert_eq!(ScannerConfig::load(&path).unwrap(), cfg);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ScannerConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
