use blendview_camera::{Camera, Movement};
use serde::{Deserialize, Serialize};

/// A high-level action produced by the input layer.
///
/// The application consumes actions, never raw input events, so any host
/// (window loop, scripted run, test) drives the camera the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Move the camera one frame step.
    Move(Movement),
    /// Turn the camera by yaw and pitch deltas in degrees.
    Look { yaw: f32, pitch: f32 },
    /// Narrow (positive) or widen (negative) the field of view by degrees.
    Zoom(f32),
    /// Request the application to exit.
    Quit,
}

impl Action {
    /// Apply the camera part of this action. Returns `true` if the camera changed.
    ///
    /// `Zoom` and `Quit` belong to the application and are ignored here.
    pub fn apply_to(self, camera: &mut Camera) -> bool {
        match self {
            Action::Move(movement) => {
                camera.apply(movement);
                true
            }
            Action::Look { yaw, pitch } => {
                camera.add_yaw(yaw);
                camera.add_pitch(pitch);
                true
            }
            Action::Zoom(_) | Action::Quit => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_action_moves_camera() {
        let mut cam = Camera::default();
        cam.set_delta_time(1.0);
        let start = cam.position();
        assert!(Action::Move(Movement::Forward).apply_to(&mut cam));
        assert_ne!(cam.position(), start);
    }

    #[test]
    fn look_action_turns_camera() {
        let mut cam = Camera::default();
        let yaw = cam.yaw();
        assert!(Action::Look { yaw: 10.0, pitch: 95.0 }.apply_to(&mut cam));
        assert_eq!(cam.yaw(), yaw + 10.0);
        assert_eq!(cam.pitch(), 89.0);
    }

    #[test]
    fn application_actions_leave_camera_alone() {
        let mut cam = Camera::default();
        let before = cam.clone();
        assert!(!Action::Zoom(3.0).apply_to(&mut cam));
        assert!(!Action::Quit.apply_to(&mut cam));
        assert_eq!(cam, before);
    }
}
