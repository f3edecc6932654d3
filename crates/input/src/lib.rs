//! Input layer: keyboard and mouse state mapped to high-level camera actions.
//!
//! # Invariants
//! - Raw device state never reaches the camera; only [`Action`]s do.
//! - Movement resolution follows a fixed priority table so simultaneous key
//!   presses always produce the same single command.
//! - Look deltas are produced only while mouse-look is enabled.

pub mod action;
mod event;
mod keys;
mod mouse;

pub use action::Action;
pub use event::InputEvent;
pub use keys::{InputError, Key, KeyState, map_keys, resolve_movement};
pub use mouse::{CursorMode, FieldOfView, MouseButton, MouseLook};

pub fn crate_info() -> &'static str {
    concat!("blendview-input v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
