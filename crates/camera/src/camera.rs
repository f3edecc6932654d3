use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

use crate::movement::Movement;

/// World up axis. Shared by every camera and never mutated.
pub const UP: Vec3 = Vec3::Y;

/// Movement speed in world units per second.
pub const MOVE_NORMALIZER: f32 = 2.5;

/// Pitch is kept within `[-PITCH_LIMIT, PITCH_LIMIT]` degrees so the look
/// vector never flips over the poles.
pub const PITCH_LIMIT: f32 = 89.0;

/// Movement model, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraType {
    /// Moves along the full 3D look direction.
    #[default]
    Fly,
    /// Moves like a fly camera, then snaps back to ground level (`y == 0`).
    Fps,
}

/// Construction parameters for [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraArgs {
    pub camera_type: CameraType,
    pub position: Vec3,
    /// Accepted for symmetry with the other fields but overwritten right away:
    /// orientation comes from `yaw` and `pitch` only.
    pub direction: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees. Clamped to the pitch limit on construction.
    pub pitch: f32,
    /// Seconds.
    pub delta_time: f32,
}

impl Default for CameraArgs {
    fn default() -> Self {
        Self {
            camera_type: CameraType::Fly,
            position: Vec3::new(0.0, 0.5, 3.0),
            direction: Vec3::NEG_Z,
            yaw: -75.0,
            pitch: 0.0,
            delta_time: 0.0,
        }
    }
}

/// Free-fly / first-person camera.
///
/// Orientation is stored as yaw and pitch in degrees; the look direction is
/// derived from them after every change and cannot be set directly. Moves are
/// scaled by [`MOVE_NORMALIZER`] and the delta time last given to
/// [`Camera::set_delta_time`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    direction: Vec3,
    yaw: f32,
    pitch: f32,
    delta_time: f32,
    camera_type: CameraType,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraArgs::default())
    }
}

impl Camera {
    pub fn new(args: CameraArgs) -> Self {
        let mut camera = Self {
            position: args.position,
            direction: args.direction,
            yaw: args.yaw,
            pitch: args.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            delta_time: args.delta_time,
            camera_type: args.camera_type,
        };
        camera.calculate_direction();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn camera_type(&self) -> CameraType {
        self.camera_type
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw += delta;
        self.calculate_direction();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        let pitch = self.pitch + delta;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        if self.pitch != pitch {
            tracing::trace!(requested = pitch, pitch = self.pitch, "pitch clamped");
        }
        self.calculate_direction();
    }

    /// Store the frame time used to scale subsequent moves. Call once per
    /// frame before issuing that frame's moves.
    pub fn set_delta_time(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
    }

    pub fn move_forward(&mut self) {
        self.position += self.step() * self.direction;
        self.pin_to_ground();
    }

    pub fn move_backward(&mut self) {
        self.position -= self.step() * self.direction;
        self.pin_to_ground();
    }

    pub fn move_left(&mut self) {
        self.position += self.step() * self.left();
        self.pin_to_ground();
    }

    pub fn move_right(&mut self) {
        self.position -= self.step() * self.left();
        self.pin_to_ground();
    }

    pub fn move_forward_left(&mut self) {
        self.position += self.step() * self.diagonal(Side::Left);
        self.pin_to_ground();
    }

    pub fn move_forward_right(&mut self) {
        self.position += self.step() * self.diagonal(Side::Right);
        self.pin_to_ground();
    }

    pub fn move_backward_left(&mut self) {
        self.position -= self.step() * self.diagonal(Side::Right);
        self.pin_to_ground();
    }

    pub fn move_backward_right(&mut self) {
        self.position -= self.step() * self.diagonal(Side::Left);
        self.pin_to_ground();
    }

    /// Apply one movement command.
    pub fn apply(&mut self, movement: Movement) {
        match movement {
            Movement::Forward => self.move_forward(),
            Movement::Backward => self.move_backward(),
            Movement::Left => self.move_left(),
            Movement::Right => self.move_right(),
            Movement::ForwardLeft => self.move_forward_left(),
            Movement::ForwardRight => self.move_forward_right(),
            Movement::BackwardLeft => self.move_backward_left(),
            Movement::BackwardRight => self.move_backward_right(),
        }
    }

    /// World-to-eye transform. Computed on every call.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction, UP)
    }

    fn step(&self) -> f32 {
        MOVE_NORMALIZER * self.delta_time
    }

    /// Horizontal unit vector to the viewer's left.
    fn left(&self) -> Vec3 {
        UP.cross(self.direction).normalize()
    }

    /// Look direction rotated 45 degrees toward `side` about the camera's
    /// local up axis. Bisects forward and the side vector at any pitch.
    fn diagonal(&self, side: Side) -> Vec3 {
        let left = self.left();
        let axis = match side {
            Side::Left => self.direction.cross(left),
            Side::Right => left.cross(self.direction),
        }
        .normalize();
        Quat::from_axis_angle(axis, FRAC_PI_4) * self.direction
    }

    fn pin_to_ground(&mut self) {
        if self.camera_type == CameraType::Fps {
            self.position.y = 0.0;
        }
    }

    fn calculate_direction(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.direction = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}
