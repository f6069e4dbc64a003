//! Rendering hand-off
//!
//! The game never issues drawing commands. Each frame it walks the live
//! state and hands entity and text requests to an external `Renderer`.

pub mod scene;

pub use scene::{Align, EntityView, Renderer, TextStyle, submit_frame};
