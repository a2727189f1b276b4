//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to held-key state)

pub mod input;

pub use input::KeyState;
