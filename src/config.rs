//! Chart tuning knobs.
//!
//! All fields carry `#[serde(default)]`, so a partial `config.json` is valid:
//! missing keys fall back to the built-in defaults.

use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GanttResult;
use crate::model::color::hex_color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Margin around the plot area, in pixels.
    pub padding: f32,
    pub row_height_base: f32,
    pub bar_height_base: f32,
    pub header_height: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Zoom change per wheel notch.
    pub zoom_step: f32,
    /// Unzoomed width of one day.
    pub day_width_base: f32,
    /// Minimum distance between two week labels.
    pub min_label_spacing_pixels: f32,
    /// How far past today the focus range reaches.
    pub focus_period_in_days: i64,
    /// Space kept left of the focus range when scrolling it into view.
    pub scroll_lead_in: f32,
    pub corner_radius: f32,
    /// Pointer tolerance around event markers.
    pub event_hitbox_width: f32,
    /// Tooltip distance from the pointer.
    pub tooltip_offset: f32,
    #[serde(with = "hex_color")]
    pub default_task_color: Color32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            row_height_base: 20.0,
            bar_height_base: 15.0,
            header_height: 20.0,
            zoom_min: 0.2,
            zoom_max: 5.0,
            zoom_step: 0.1,
            day_width_base: 2.0,
            min_label_spacing_pixels: 80.0,
            focus_period_in_days: 15,
            scroll_lead_in: 50.0,
            corner_radius: 3.0,
            event_hitbox_width: 10.0,
            tooltip_offset: 15.0,
            default_task_color: Color32::from_rgb(0x31, 0x82, 0xce),
        }
    }
}

impl ChartConfig {
    /// Load the user's config from the OS config directory.
    ///
    /// Never fails: a missing file gives the defaults, and a malformed one is
    /// logged and replaced by the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no chart config, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read chart config");
                return Self::default();
            }
        };
        match Self::from_json(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed chart config");
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> GanttResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "GanttTimeline")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}
