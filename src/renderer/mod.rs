//! Rendering
//!
//! The scene is built as a display list, composed on the CPU canvas, then
//! presented through wgpu as a single textured quad.

pub mod canvas;
pub mod pipeline;
pub mod scene;
pub mod vertex;

pub use canvas::Canvas;
pub use pipeline::Presenter;
pub use scene::{Anchor, DrawCmd, Hud, TextAlign, build_scene};
