use serde::{Deserialize, Serialize};

use crate::error::{DataVisError, DataVisResult};

use super::{ScreenPoint, Viewport};

pub const MIN_ZOOM_LEVEL: f32 = 10.0;
pub const MAX_ZOOM_LEVEL: f32 = 500.0;
pub const DEFAULT_ZOOM_LEVEL: f32 = 100.0;

/// Named camera placements, expressed as `(x_rotation, y_rotation)` degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CameraPreset {
    #[default]
    NoPreset,
    FrontLow,
    Front,
    FrontHigh,
    LeftLow,
    Left,
    LeftHigh,
    RightLow,
    Right,
    RightHigh,
    BehindLow,
    Behind,
    BehindHigh,
    IsometricLeft,
    IsometricLeftHigh,
    IsometricRight,
    IsometricRightHigh,
    DirectlyAbove,
    DirectlyAboveCw45,
    DirectlyAboveCcw45,
    FrontBelow,
    LeftBelow,
    RightBelow,
    BehindBelow,
    DirectlyBelow,
}

impl CameraPreset {
    /// Rotations for the preset; `None` for [`CameraPreset::NoPreset`].
    #[must_use]
    pub const fn rotations(self) -> Option<(f32, f32)> {
        let rotations = match self {
            Self::NoPreset => return None,
            Self::FrontLow => (0.0, 0.0),
            Self::Front => (0.0, 22.5),
            Self::FrontHigh => (0.0, 45.0),
            Self::LeftLow => (90.0, 0.0),
            Self::Left => (90.0, 22.5),
            Self::LeftHigh => (90.0, 45.0),
            Self::RightLow => (-90.0, 0.0),
            Self::Right => (-90.0, 22.5),
            Self::RightHigh => (-90.0, 45.0),
            Self::BehindLow => (180.0, 0.0),
            Self::Behind => (180.0, 22.5),
            Self::BehindHigh => (180.0, 45.0),
            Self::IsometricLeft => (45.0, 22.5),
            Self::IsometricLeftHigh => (45.0, 45.0),
            Self::IsometricRight => (-45.0, 22.5),
            Self::IsometricRightHigh => (-45.0, 45.0),
            Self::DirectlyAbove => (0.0, 90.0),
            Self::DirectlyAboveCw45 => (-45.0, 90.0),
            Self::DirectlyAboveCcw45 => (45.0, 90.0),
            Self::FrontBelow => (0.0, -45.0),
            Self::LeftBelow => (90.0, -45.0),
            Self::RightBelow => (-90.0, -45.0),
            Self::BehindBelow => (180.0, -45.0),
            Self::DirectlyBelow => (0.0, -90.0),
        };
        Some(rotations)
    }
}

/// Camera placement state. Projection math lives in the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    x_rotation: f32,
    y_rotation: f32,
    zoom_level: f32,
    min_zoom_level: f32,
    max_zoom_level: f32,
    preset: CameraPreset,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x_rotation: 0.0,
            y_rotation: 0.0,
            zoom_level: DEFAULT_ZOOM_LEVEL,
            min_zoom_level: MIN_ZOOM_LEVEL,
            max_zoom_level: MAX_ZOOM_LEVEL,
            preset: CameraPreset::NoPreset,
        }
    }
}

impl Camera {
    #[must_use]
    pub fn rotations(&self) -> (f32, f32) {
        (self.x_rotation, self.y_rotation)
    }

    /// Free rotation; clears the active preset.
    pub fn set_rotations(&mut self, x_rotation: f32, y_rotation: f32) {
        self.x_rotation = x_rotation;
        self.y_rotation = y_rotation;
        self.preset = CameraPreset::NoPreset;
    }

    #[must_use]
    pub fn preset(&self) -> CameraPreset {
        self.preset
    }

    pub fn set_preset(&mut self, preset: CameraPreset) {
        if let Some((x_rotation, y_rotation)) = preset.rotations() {
            self.x_rotation = x_rotation;
            self.y_rotation = y_rotation;
        }
        self.preset = preset;
    }

    #[must_use]
    pub fn zoom_level(&self) -> f32 {
        self.zoom_level
    }

    /// Zoom is clamped into the configured limits.
    pub fn set_zoom_level(&mut self, zoom_level: f32) {
        if zoom_level.is_finite() {
            self.zoom_level = zoom_level.clamp(self.min_zoom_level, self.max_zoom_level);
        }
    }

    #[must_use]
    pub fn zoom_limits(&self) -> (f32, f32) {
        (self.min_zoom_level, self.max_zoom_level)
    }

    pub fn set_zoom_limits(&mut self, min: f32, max: f32) -> DataVisResult<()> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(DataVisError::InvalidRange { min, max });
        }
        self.min_zoom_level = min;
        self.max_zoom_level = max;
        self.zoom_level = self.zoom_level.clamp(min, max);
        Ok(())
    }
}

/// Viewport, camera and pending selection query of one graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    viewport: Viewport,
    camera: Camera,
    selection_query: Option<ScreenPoint>,
    slicing_active: bool,
}

impl Scene {
    pub fn new(viewport: Viewport) -> DataVisResult<Self> {
        if !viewport.is_valid() {
            return Err(DataVisError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self {
            viewport,
            camera: Camera::default(),
            selection_query: None,
            slicing_active: false,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> DataVisResult<()> {
        if !viewport.is_valid() {
            return Err(DataVisError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Pending pick request, resolved at the next synchronize.
    #[must_use]
    pub fn selection_query(&self) -> Option<ScreenPoint> {
        self.selection_query
    }

    pub fn set_selection_query(&mut self, position: ScreenPoint) {
        self.selection_query = Some(position);
    }

    pub(crate) fn take_selection_query(&mut self) -> Option<ScreenPoint> {
        self.selection_query.take()
    }

    #[must_use]
    pub fn is_slicing_active(&self) -> bool {
        self.slicing_active
    }

    pub fn set_slicing_active(&mut self, active: bool) {
        self.slicing_active = active;
    }
}
