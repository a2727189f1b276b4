//! Rendering module
//!
//! The simulation is turned into a flat list of draw commands, which the
//! canvas backend replays onto a `CanvasRenderingContext2d`.

pub mod draw;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw::{DrawCommand, build_frame};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
