use blendview_camera::{Camera, Projection};
use glam::{Mat4, Vec3};

use crate::scene::Scene;

/// Everything a renderer needs from the camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Unit look direction.
    pub direction: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_camera(&Camera::default(), &Projection::default())
    }
}

impl RenderView {
    pub fn from_camera(camera: &Camera, projection: &Projection) -> Self {
        Self {
            eye: camera.position(),
            direction: camera.direction(),
            view: camera.view(),
            projection: projection.matrix(),
            fov_degrees: projection.fov_degrees,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Whether a world-space point lands inside the view frustum.
    pub fn is_visible(&self, point: Vec3) -> bool {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return false;
        }
        let ndc = clip.truncate() / clip.w;
        ndc.abs().max_element() <= 1.0
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a view, then produces output. It never
/// mutates camera or scene state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene from the given view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Text renderer for headless runs.
///
/// Lists the draw calls of one frame in order, with each item's distance from
/// the eye and whether its origin is on screen.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Frame (fov={:.1}) ===\n", view.fov_degrees));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) dir=({:.3}, {:.3}, {:.3})\n",
            view.eye.x, view.eye.y, view.eye.z, view.direction.x, view.direction.y, view.direction.z
        ));
        out.push_str(&format!("Draw calls: {}\n", scene.len()));

        for (index, item) in scene.items().iter().enumerate() {
            let p = item.transform.position;
            out.push_str(&format!(
                "  [{index}] {:<6} {:<8} pos=({:.2}, {:.2}, {:.2}) dist={:.2} {}",
                item.shape.as_str(),
                item.name,
                p.x,
                p.y,
                p.z,
                p.distance(view.eye),
                if view.is_visible(p) { "visible" } else { "culled" },
            ));
            if item.transparent {
                out.push_str(" blend");
            }
            if let Some(c) = item.outline {
                out.push_str(&format!(" outline=({:.2}, {:.2}, {:.2})", c.r, c.g, c.b));
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blendview_camera::CameraArgs;

    #[test]
    fn debug_renderer_empty_scene() {
        let output = DebugTextRenderer::new().render(&Scene::new(), &RenderView::default());
        assert!(output.contains("fov=45.0"));
        assert!(output.contains("Draw calls: 0"));
    }

    #[test]
    fn debug_renderer_lists_items_in_order() {
        let scene = Scene::demo();
        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());

        assert!(output.contains("Draw calls: 6"));
        let floor = output.find("floor").unwrap();
        let window = output.find("window").unwrap();
        assert!(floor < window);
        assert_eq!(output.matches("outline=").count(), 2);
        assert_eq!(output.matches(" blend").count(), 3);
    }

    #[test]
    fn visibility_follows_look_direction() {
        let camera = Camera::new(CameraArgs {
            position: Vec3::new(0.0, 0.5, 3.0),
            yaw: -90.0,
            pitch: 0.0,
            ..CameraArgs::default()
        });
        let view = RenderView::from_camera(&camera, &Projection::default());
        assert!(view.is_visible(Vec3::new(0.0, 0.5, 0.0)));
        assert!(!view.is_visible(Vec3::new(0.0, 0.5, 6.0)));
    }

    #[test]
    fn view_projection_composes_matrices() {
        let view = RenderView::default();
        assert_eq!(view.view_projection(), view.projection * view.view);
    }
}
