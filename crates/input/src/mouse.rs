use serde::{Deserialize, Serialize};

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// How the host should display the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorMode {
    Normal,
    Hidden,
}

/// Drag-to-look state.
///
/// Holding the left button enables look; cursor motion then turns the camera
/// by an amount scaled with the current field of view, so angular speed feels
/// the same when zoomed in. The last cursor position is tracked even while
/// look is disabled, so enabling it never produces a jump.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseLook {
    enabled: bool,
    last: (f32, f32),
    /// Degrees of turn per pixel at the reference field of view.
    pub sensitivity: f32,
    /// Field of view (degrees) at which `sensitivity` applies unscaled.
    pub reference_fov: f32,
}

impl MouseLook {
    pub const DEFAULT_SENSITIVITY: f32 = 0.1;
    pub const DEFAULT_REFERENCE_FOV: f32 = 45.0;

    /// Start with look disabled and the cursor assumed at `start`.
    pub fn new(start: (f32, f32)) -> Self {
        Self {
            enabled: false,
            last: start,
            sensitivity: Self::DEFAULT_SENSITIVITY,
            reference_fov: Self::DEFAULT_REFERENCE_FOV,
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: f32, reference_fov: f32) -> Self {
        self.sensitivity = sensitivity;
        self.reference_fov = reference_fov;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_position(&self) -> (f32, f32) {
        self.last
    }

    /// Handle a button edge. Returns the cursor mode to apply when the
    /// look button changed state, `None` for other buttons.
    pub fn button(&mut self, button: MouseButton, pressed: bool) -> Option<CursorMode> {
        if button != MouseButton::Left {
            return None;
        }
        self.enabled = pressed;
        tracing::debug!(enabled = pressed, "mouse look toggled");
        Some(if pressed {
            CursorMode::Hidden
        } else {
            CursorMode::Normal
        })
    }

    /// Handle cursor motion. Produces a look action only while enabled.
    ///
    /// Moving right turns left (yaw decreases with x) and moving down looks
    /// up (pitch grows with y).
    pub fn cursor_moved(&mut self, x: f32, y: f32, fov: f32) -> Option<Action> {
        let (last_x, last_y) = self.last;
        self.last = (x, y);
        if !self.enabled {
            return None;
        }

        let scale = self.sensitivity * fov / self.reference_fov;
        Some(Action::Look {
            yaw: (last_x - x) * scale,
            pitch: (y - last_y) * scale,
        })
    }
}

/// Zoomable field of view in degrees, clamped to `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldOfView {
    degrees: f32,
    min: f32,
    max: f32,
}

impl Default for FieldOfView {
    fn default() -> Self {
        Self {
            degrees: 45.0,
            min: 1.0,
            max: 45.0,
        }
    }
}

impl FieldOfView {
    /// `degrees` is clamped into `[min, max]`.
    pub fn new(degrees: f32, min: f32, max: f32) -> Self {
        Self {
            degrees: degrees.clamp(min, max),
            min,
            max,
        }
    }

    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Scroll up (positive) narrows the view.
    pub fn zoom(&mut self, amount: f32) -> f32 {
        self.degrees = (self.degrees - amount).clamp(self.min, self.max);
        tracing::debug!(fov = self.degrees, "field of view changed");
        self.degrees
    }
}
