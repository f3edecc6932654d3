use blendview_camera::{Camera, CameraUniform, Projection};
use blendview_common::Viewport;
use blendview_input::{Action, CursorMode, FieldOfView, InputEvent, KeyState, MouseLook, map_keys};
use blendview_scene::RenderView;
use glam::{Mat4, Vec3};
use serde::Serialize;

use crate::clock::{FrameClock, FrameTimer};
use crate::config::{AppConfig, ProjectionConfig};

/// What the renderer gets each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameOutput {
    pub frame: u64,
    /// Host time in seconds.
    pub time: f64,
    pub delta_time: f32,
    pub camera_position: Vec3,
    pub camera_direction: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub view: Mat4,
    pub projection: Mat4,
    /// Escape was held this frame.
    pub quit: bool,
}

impl FrameOutput {
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
            position: self.camera_position.extend(1.0).to_array(),
        }
    }

    pub fn render_view(&self) -> RenderView {
        RenderView {
            eye: self.camera_position,
            direction: self.camera_direction,
            view: self.view,
            projection: self.projection,
            fov_degrees: self.fov,
        }
    }
}

/// Application state for one running demo.
///
/// Holds the camera together with everything the input handlers need between
/// events: held keys, mouse-look state, field of view, viewport size and the
/// frame clock. Hosts forward raw events with [`AppContext::handle_event`] and
/// call [`AppContext::frame`] once per frame.
#[derive(Debug, Clone)]
pub struct AppContext {
    camera: Camera,
    keys: KeyState,
    mouse: MouseLook,
    fov: FieldOfView,
    viewport: Viewport,
    projection: ProjectionConfig,
    cursor_mode: CursorMode,
    clock: FrameClock,
    timer: FrameTimer,
    quit: bool,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Self {
        let viewport = config.window.viewport();
        let input = &config.input;
        Self {
            camera: Camera::new(config.camera.args()),
            keys: KeyState::new(),
            mouse: MouseLook::new(viewport.center())
                .with_sensitivity(input.sensitivity, input.reference_fov),
            fov: FieldOfView::new(input.initial_fov, input.min_fov, input.max_fov),
            viewport,
            projection: config.projection.clone(),
            cursor_mode: CursorMode::Normal,
            clock: FrameClock::new(),
            timer: FrameTimer::default(),
            quit: false,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn fov(&self) -> f32 {
        self.fov.degrees()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    pub fn is_looking(&self) -> bool {
        self.mouse.is_enabled()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn projection(&self) -> Projection {
        self.projection.projection(self.fov.degrees(), self.viewport)
    }

    pub fn render_view(&self) -> RenderView {
        RenderView::from_camera(&self.camera, &self.projection())
    }

    /// Feed one raw input event.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::CursorMoved { x, y } => {
                if let Some(action) = self.mouse.cursor_moved(x, y, self.fov.degrees()) {
                    self.apply(action);
                }
            }
            InputEvent::MouseButton { button, pressed } => {
                if let Some(mode) = self.mouse.button(button, pressed) {
                    self.cursor_mode = mode;
                }
            }
            InputEvent::Scroll { dy } => self.apply(Action::Zoom(dy)),
            InputEvent::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
                tracing::debug!(width, height, "viewport resized");
            }
            InputEvent::Key { key, pressed } => self.keys.set(key, pressed),
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Zoom(amount) => {
                self.fov.zoom(amount);
            }
            Action::Quit => {
                if !self.quit {
                    tracing::info!("quit requested");
                }
                self.quit = true;
            }
            other => {
                other.apply_to(&mut self.camera);
            }
        }
    }

    /// Run one frame at host time `time` (seconds).
    ///
    /// Sets the camera delta time first, then applies the actions resolved
    /// from the currently held keys, so moves always use this frame's delta.
    pub fn frame(&mut self, time: f64) -> FrameOutput {
        let delta_time = self.clock.tick(time);
        self.camera.set_delta_time(delta_time);
        self.timer.record_secs(delta_time);

        for action in map_keys(&self.keys) {
            self.apply(action);
        }

        let projection = self.projection();
        let output = FrameOutput {
            frame: self.clock.frame(),
            time,
            delta_time,
            camera_position: self.camera.position(),
            camera_direction: self.camera.direction(),
            yaw: self.camera.yaw(),
            pitch: self.camera.pitch(),
            fov: projection.fov_degrees,
            view: self.camera.view(),
            projection: projection.matrix(),
            quit: self.quit,
        };
        tracing::trace!(
            frame = output.frame,
            dt = delta_time,
            position = ?output.camera_position,
            "frame"
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blendview_camera::{CameraType, MOVE_NORMALIZER};
    use blendview_input::{Key, MouseButton};
    use std::time::Duration;

    use crate::script::InputScript;

    fn context() -> AppContext {
        AppContext::new(&AppConfig::default())
    }

    #[test]
    fn starts_from_config() {
        let ctx = context();
        assert_eq!(ctx.camera().position(), Vec3::new(0.0, 0.5, 3.0));
        assert_eq!(ctx.fov(), 45.0);
        assert_eq!(ctx.viewport(), Viewport::new(800, 600));
        assert_eq!(ctx.cursor_mode(), CursorMode::Normal);
        assert!(!ctx.should_quit());
    }

    #[test]
    fn frame_without_input_keeps_camera_still() {
        let mut ctx = context();
        let out = ctx.frame(0.016);
        assert_eq!(out.frame, 1);
        assert_eq!(out.camera_position, Vec3::new(0.0, 0.5, 3.0));
        assert_eq!(out.view, ctx.camera().view());
    }

    #[test]
    fn held_key_moves_with_this_frames_delta() {
        let mut ctx = context();
        let dir = ctx.camera().direction();
        ctx.handle_event(&InputEvent::Key {
            key: Key::W,
            pressed: true,
        });
        let out = ctx.frame(0.5);
        let expected = Vec3::new(0.0, 0.5, 3.0) + dir * MOVE_NORMALIZER * 0.5;
        assert!(out.camera_position.abs_diff_eq(expected, 1e-5));
        assert_eq!(out.delta_time, 0.5);

        ctx.handle_event(&InputEvent::Key {
            key: Key::W,
            pressed: false,
        });
        let still = ctx.frame(1.0);
        assert_eq!(still.camera_position, out.camera_position);
    }

    #[test]
    fn look_only_while_button_held() {
        let mut ctx = context();
        let yaw = ctx.camera().yaw();

        ctx.handle_event(&InputEvent::CursorMoved { x: 500.0, y: 300.0 });
        assert_eq!(ctx.camera().yaw(), yaw);

        ctx.handle_event(&InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert_eq!(ctx.cursor_mode(), CursorMode::Hidden);
        assert!(ctx.is_looking());

        ctx.handle_event(&InputEvent::CursorMoved { x: 450.0, y: 320.0 });
        assert!((ctx.camera().yaw() - (yaw + 5.0)).abs() < 1e-4);
        assert!((ctx.camera().pitch() - 2.0).abs() < 1e-4);

        ctx.handle_event(&InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        assert_eq!(ctx.cursor_mode(), CursorMode::Normal);
        ctx.handle_event(&InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        assert!((ctx.camera().yaw() - (yaw + 5.0)).abs() < 1e-4);
    }

    #[test]
    fn zoom_narrows_fov_and_slows_look() {
        let mut ctx = context();
        ctx.handle_event(&InputEvent::Scroll { dy: 30.0 });
        assert_eq!(ctx.fov(), 15.0);
        ctx.handle_event(&InputEvent::Scroll { dy: 100.0 });
        assert_eq!(ctx.fov(), 1.0);
        ctx.handle_event(&InputEvent::Scroll { dy: -14.0 });
        assert_eq!(ctx.fov(), 15.0);

        let yaw = ctx.camera().yaw();
        ctx.handle_event(&InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        // Cursor starts at the viewport center (400, 300).
        ctx.handle_event(&InputEvent::CursorMoved { x: 370.0, y: 300.0 });
        // 30 px * 0.1 * 15/45 = 1 degree
        assert!((ctx.camera().yaw() - (yaw + 1.0)).abs() < 1e-4);
    }

    #[test]
    fn resize_changes_aspect() {
        let mut ctx = context();
        ctx.handle_event(&InputEvent::Resized {
            width: 1000,
            height: 500,
        });
        assert_eq!(ctx.projection().aspect, 2.0);
    }

    #[test]
    fn escape_requests_quit() {
        let mut ctx = context();
        ctx.handle_event(&InputEvent::Key {
            key: Key::Escape,
            pressed: true,
        });
        let out = ctx.frame(0.1);
        assert!(out.quit);
        assert!(ctx.should_quit());
    }

    #[test]
    fn fps_config_pins_camera_to_ground() {
        let mut config = AppConfig::default();
        config.camera.camera_type = CameraType::Fps;
        config.camera.pitch = 30.0;
        let mut ctx = AppContext::new(&config);
        ctx.handle_event(&InputEvent::Key {
            key: Key::W,
            pressed: true,
        });
        let out = ctx.frame(0.25);
        assert_eq!(out.camera_position.y, 0.0);
    }

    #[test]
    fn output_packs_uniform_and_view() {
        let mut ctx = context();
        let out = ctx.frame(0.016);
        let u = out.uniform();
        assert_eq!(u.position, [0.0, 0.5, 3.0, 1.0]);
        assert_eq!(u, ctx.camera().uniform(&ctx.projection()));
        assert_eq!(out.render_view(), ctx.render_view());
    }

    #[test]
    fn stalled_frame_jumps_instead_of_failing() {
        let mut ctx = context();
        let start = ctx.camera().position();
        ctx.handle_event(&InputEvent::Key {
            key: Key::W,
            pressed: true,
        });
        let out = ctx.frame(1.0e20);
        assert!(out.camera_position.is_finite());
        assert!((out.camera_position - start).abs().max_element() > 1.0e19);

        ctx.frame(2.0e20);
        assert_eq!(ctx.timer().count(), 2);
        assert!(ctx.timer().average() > Duration::from_secs(1 << 60));
    }

    #[test]
    fn stalled_script_runs_to_completion() {
        let script = InputScript::from_yaml_str("frames:\n  - time: 1.0e19\n  - time: 2.0e19\n")
            .unwrap();
        let mut ctx = context();
        let outputs = script.run(&mut ctx);
        assert_eq!(outputs.len(), 2);
        assert!(ctx.timer().max() > Duration::ZERO);
    }

    #[test]
    fn timer_records_frames() {
        let mut ctx = context();
        ctx.frame(0.1);
        ctx.frame(0.2);
        assert_eq!(ctx.timer().count(), 2);
        assert_eq!(ctx.clock().frame(), 2);
    }
}
