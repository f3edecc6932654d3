//! Scene description: an ordered list of draw items plus the renderer-facing
//! view derived from the camera.
//!
//! # Invariants
//! - Draw order is list order. Opaque items come first in the demo scene so
//!   transparent quads blend over what is already drawn.
//! - Renderers read the scene and view; they never mutate either.

mod renderer;
mod scene;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use scene::{DrawItem, Scene, SceneError, Shape, TextureWrap};

pub fn crate_info() -> &'static str {
    concat!("blendview-scene v", env!("CARGO_PKG_VERSION"))
}
