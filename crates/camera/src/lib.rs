//! Camera controller: position and orientation driven by look deltas and
//! discrete move commands, producing the view transform for a renderer.
//!
//! # Invariants
//! - `direction` is unit length and always recomputed from yaw/pitch.
//! - Pitch stays within [-89, 89] degrees.
//! - An fps camera sits at `y == 0.0` after every move.
//! - The camera never touches the renderer; it only hands out matrices.

mod camera;
mod movement;
mod projection;

pub use camera::{Camera, CameraArgs, CameraType, MOVE_NORMALIZER, PITCH_LIMIT, UP};
pub use movement::Movement;
pub use projection::{CameraUniform, Projection};

pub fn crate_info() -> &'static str {
    concat!("blendview-camera v", env!("CARGO_PKG_VERSION"))
}
