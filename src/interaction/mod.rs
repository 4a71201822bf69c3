use serde::{Deserialize, Serialize};

use crate::core::scene::{MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};
use crate::core::{Scene, ScreenPoint};

const ONE_TO_ONE_ZOOM_LEVEL: f32 = 100.0;
const HALF_SIZE_ZOOM_LEVEL: f32 = 50.0;
const NEAR_ZOOM_RANGE_DIVIDER: f32 = 12.0;
const MID_ZOOM_RANGE_DIVIDER: f32 = 60.0;
const FAR_ZOOM_RANGE_DIVIDER: f32 = 120.0;
pub const DEFAULT_ROTATION_SPEED: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputState {
    #[default]
    None,
    OnScene,
    OnSlice,
    Rotating,
}

/// Request produced by the input handler and applied by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputAction {
    SelectionQuery(ScreenPoint),
    /// Rotation deltas in degrees, added to the camera rotations.
    Rotate { dx: f32, dy: f32 },
    /// New absolute zoom level, already clamped.
    Zoom(f32),
}

/// Translates pointer and wheel input into camera and selection requests.
///
/// Left press picks, right drag rotates, the wheel zooms in three speed bands.
/// While slicing is active rotation and zoom are disabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputHandler {
    state: InputState,
    position: ScreenPoint,
    previous_position: ScreenPoint,
    rotation_speed: f32,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self {
            state: InputState::None,
            position: ScreenPoint::default(),
            previous_position: ScreenPoint::default(),
            rotation_speed: DEFAULT_ROTATION_SPEED,
        }
    }
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    #[must_use]
    pub fn position(&self) -> ScreenPoint {
        self.position
    }

    #[must_use]
    pub fn previous_position(&self) -> ScreenPoint {
        self.previous_position
    }

    #[must_use]
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn set_rotation_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed > 0.0 {
            self.rotation_speed = speed;
        }
    }

    pub fn mouse_press(
        &mut self,
        button: MouseButton,
        position: ScreenPoint,
        scene: &Scene,
    ) -> Option<InputAction> {
        match button {
            MouseButton::Left => {
                if scene.is_slicing_active() {
                    self.state = InputState::OnSlice;
                    return None;
                }
                self.state = InputState::OnScene;
                self.position = position;
                Some(InputAction::SelectionQuery(position))
            }
            MouseButton::Middle => {
                self.position = ScreenPoint::default();
                None
            }
            MouseButton::Right => {
                if !scene.is_slicing_active() {
                    self.state = InputState::Rotating;
                }
                self.position = position;
                None
            }
        }
    }

    pub fn mouse_move(&mut self, position: ScreenPoint, scene: &Scene) -> Option<InputAction> {
        if self.state != InputState::Rotating {
            return None;
        }
        let viewport = scene.viewport();
        let dx = (position.x - self.position.x) as f32
            / (viewport.width as f32 / self.rotation_speed);
        let dy = (position.y - self.position.y) as f32
            / (viewport.height as f32 / self.rotation_speed);
        self.previous_position = self.position;
        self.position = position;
        Some(InputAction::Rotate { dx, dy })
    }

    pub fn mouse_release(&mut self, position: ScreenPoint) {
        if self.state == InputState::Rotating {
            self.position = position;
        }
        self.state = InputState::None;
    }

    /// Wheel `delta` is in eighths of a degree, 120 per notch.
    pub fn wheel(&mut self, delta: i32, scene: &Scene) -> Option<InputAction> {
        if scene.is_slicing_active() {
            return None;
        }
        let zoom = scene.camera().zoom_level();
        let divider = if zoom > ONE_TO_ONE_ZOOM_LEVEL {
            NEAR_ZOOM_RANGE_DIVIDER
        } else if zoom > HALF_SIZE_ZOOM_LEVEL {
            MID_ZOOM_RANGE_DIVIDER
        } else {
            FAR_ZOOM_RANGE_DIVIDER
        };
        let level = (zoom + (delta as f32 / divider).trunc()).clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL);
        Some(InputAction::Zoom(level))
    }
}
