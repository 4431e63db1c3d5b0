// src/display/window.rs
//! `Screen` and `Window` traits - the minimal platform surface the
//! presentation loop drives.
//!
//! ## Threading Model
//! - The event forwarder thread blocks in `Window::next_event`
//! - The presentation loop draws, publishes and enqueues paint requests
//!   from its own thread at the same time
//!
//! Implementations therefore synchronize internally and are `Send + Sync`.
//!
//! ## Lifecycle
//! 1. `Screen::new_window` - create the window; failure is fatal to the loop
//! 2. Events and drawing until a terminal event is observed
//! 3. `Window::release` - free platform resources

use super::messages::{DisplayError, WindowEvent};
use crate::color::Color;
use crate::geometry::{Rect, Size};
use crate::painter::Texture;
use std::sync::Arc;

/// Options for [`Screen::new_window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    pub title: String,
    /// Requested size; the platform may choose otherwise and reports the
    /// actual size with a `Size` event.
    pub size: Size,
}

/// Entry point to a windowing system.
pub trait Screen {
    fn new_window(&self, options: &WindowOptions) -> Result<Arc<dyn Window>, DisplayError>;

    /// Allocates a texture that windows of this screen can scale-blit.
    fn new_texture(&self, size: Size) -> Texture {
        Texture::new(size)
    }
}

/// A single on-screen window.
pub trait Window: Send + Sync {
    /// Blocks until the next event is available.
    fn next_event(&self) -> WindowEvent;

    /// Appends an event to this window's own event queue.
    fn send(&self, event: WindowEvent);

    /// Fills `rect` of the back buffer with `color`.
    fn fill(&self, rect: Rect, color: Color);

    /// Scales `src_rect` of `src` onto `dst` of the back buffer.
    fn scale(&self, dst: Rect, src: &Texture, src_rect: Rect);

    /// Makes the back buffer visible.
    fn publish(&self);

    /// Frees the window's platform resources.
    fn release(&self);
}
