use serde::{Deserialize, Serialize};

use crate::core::scene::{DEFAULT_ZOOM_LEVEL, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};
use crate::core::{CameraPreset, Viewport};
use crate::error::{DataVisError, DataVisResult};

use super::SelectionFlags;

/// Auto-adjust flags of the three default axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAdjustRanges {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AutoAdjustRanges {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            x: true,
            y: true,
            z: true,
        }
    }

    #[must_use]
    pub const fn as_array(self) -> [bool; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub const fn from_array([x, y, z]: [bool; 3]) -> Self {
        Self { x, y, z }
    }
}

impl Default for AutoAdjustRanges {
    fn default() -> Self {
        Self::all()
    }
}

/// Public graph bootstrap configuration.
///
/// Serializable so host applications can persist graph setup; every field
/// but the viewport has a default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub selection_mode: SelectionFlags,
    #[serde(default)]
    pub camera_preset: CameraPreset,
    #[serde(default = "default_zoom_level")]
    pub zoom_level: f32,
    #[serde(default = "default_min_zoom_level")]
    pub min_zoom_level: f32,
    #[serde(default = "default_max_zoom_level")]
    pub max_zoom_level: f32,
    #[serde(default)]
    pub auto_adjust_ranges: AutoAdjustRanges,
}

impl GraphConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            selection_mode: SelectionFlags::default(),
            camera_preset: CameraPreset::default(),
            zoom_level: default_zoom_level(),
            min_zoom_level: default_min_zoom_level(),
            max_zoom_level: default_max_zoom_level(),
            auto_adjust_ranges: AutoAdjustRanges::default(),
        }
    }

    #[must_use]
    pub fn with_selection_mode(mut self, mode: SelectionFlags) -> Self {
        self.selection_mode = mode;
        self
    }

    #[must_use]
    pub fn with_camera_preset(mut self, preset: CameraPreset) -> Self {
        self.camera_preset = preset;
        self
    }

    #[must_use]
    pub fn with_zoom_level(mut self, zoom_level: f32) -> Self {
        self.zoom_level = zoom_level;
        self
    }

    #[must_use]
    pub fn with_zoom_limits(mut self, min: f32, max: f32) -> Self {
        self.min_zoom_level = min;
        self.max_zoom_level = max;
        self
    }

    #[must_use]
    pub fn with_auto_adjust_ranges(mut self, ranges: AutoAdjustRanges) -> Self {
        self.auto_adjust_ranges = ranges;
        self
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> DataVisResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| DataVisError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> DataVisResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DataVisError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_zoom_level() -> f32 {
    DEFAULT_ZOOM_LEVEL
}

fn default_min_zoom_level() -> f32 {
    MIN_ZOOM_LEVEL
}

fn default_max_zoom_level() -> f32 {
    MAX_ZOOM_LEVEL
}
