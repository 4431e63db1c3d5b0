// src/display/mod.rs
//! Message-based presentation loop.
//!
//! - Window/Screen: platform primitives (headless in-memory driver included)
//! - Presenter: merges window events and delivered frames into redraws
//! - Messages: the window event sum type and the loop's inbox protocol

pub mod drivers;
pub mod messages;
pub mod presenter;
pub mod window;

#[cfg(test)]
mod tests;

pub use drivers::{HeadlessScreen, HeadlessWindow};
pub use messages::{DisplayError, MouseButton, Stage, WindowEvent};
pub use presenter::{FrameSender, LoopState, Presenter, PresenterError};
pub use window::{Screen, Window, WindowOptions};
