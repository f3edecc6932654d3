//! Application layer: owns the camera and all per-frame state that would
//! otherwise live in process globals, and turns raw input into camera actions.
//!
//! # Invariants
//! - One `AppContext` per running application; every handler takes it explicitly.
//! - Each frame sets the camera delta time before applying that frame's moves.
//! - The renderer only ever sees [`FrameOutput`]; it never touches the camera.

mod clock;
mod config;
mod context;
mod error;
mod script;

pub use clock::{FrameClock, FrameTimer};
pub use config::{AppConfig, CameraConfig, InputConfig, ProjectionConfig, WindowConfig};
pub use context::{AppContext, FrameOutput};
pub use error::AppError;
pub use script::{InputScript, ScriptFrame};

pub fn crate_info() -> &'static str {
    concat!("blendview-app v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("app"));
    }
}
