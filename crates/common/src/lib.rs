//! Shared value types for the blendview workspace.
//!
//! # Invariants
//! - Types here are plain values: `Copy`, serializable, no behavior beyond
//!   small derived quantities.

mod types;

pub use types::{Color, Transform, Viewport};
