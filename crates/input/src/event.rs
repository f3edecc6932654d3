use serde::{Deserialize, Serialize};

use crate::keys::Key;
use crate::mouse::MouseButton;

/// Raw, platform-neutral input event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// Cursor position in window pixels.
    CursorMoved { x: f32, y: f32 },
    MouseButton { button: MouseButton, pressed: bool },
    /// Vertical scroll offset; positive zooms in.
    Scroll { dy: f32 },
    /// Framebuffer resized, in pixels.
    Resized { width: u32, height: u32 },
    Key { key: Key, pressed: bool },
}
