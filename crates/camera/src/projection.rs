use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Perspective projection parameters.
///
/// Produces an OpenGL-convention (clip depth -1..1) right-handed matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Per-frame camera block laid out for direct upload into a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// xyz = camera position, w = 1.
    pub position: [f32; 4],
}

impl Camera {
    /// Pack view, projection and eye position for the renderer.
    pub fn uniform(&self, projection: &Projection) -> CameraUniform {
        CameraUniform {
            view: self.view().to_cols_array_2d(),
            projection: projection.matrix().to_cols_array_2d(),
            position: self.position().extend(1.0).to_array(),
        }
    }
}
