// src/display/messages.rs
//! Event types delivered by a window, and the messages the presentation loop
//! consumes.
//!
//! All communication happens via ownership transfer - no shared state.

use crate::keys::{Direction, KeySymbol, Modifiers};
use crate::painter::Texture;
use thiserror::Error;

/// Window lifecycle stages, in the order a window normally passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// The window is gone; the terminal stage.
    Dead,
    /// The window exists but is not shown.
    Alive,
    /// The window is on screen.
    Visible,
    /// The window is on screen and has input focus.
    Focused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Pointer motion without a button change.
    None,
}

/// Platform-agnostic window events.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// The window moved between lifecycle stages.
    Lifecycle { from: Stage, to: Stage },

    /// Key press or release.
    Key {
        symbol: KeySymbol,
        modifiers: Modifiers,
        direction: Direction,
    },

    /// Mouse button press or release, or pointer motion.
    Mouse {
        x: f32,
        y: f32,
        button: MouseButton,
        direction: Direction,
        modifiers: Modifiers,
    },

    /// The window was resized.
    Size { width_px: u32, height_px: u32 },

    /// The window contents should be redrawn.
    Paint,

    /// The platform reported a non-fatal error.
    Error(String),
}

impl WindowEvent {
    /// Whether this event ends the event stream: the window reached the
    /// `Dead` stage, or Escape was pressed or released.
    pub fn is_terminal(&self) -> bool {
        match self {
            WindowEvent::Lifecycle { to, .. } => *to == Stage::Dead,
            WindowEvent::Key { symbol, .. } => *symbol == KeySymbol::Escape,
            _ => false,
        }
    }

    /// A left-button press at `(x, y)`.
    pub fn left_click(x: f32, y: f32) -> Self {
        WindowEvent::Mouse {
            x,
            y,
            button: MouseButton::Left,
            direction: Direction::Press,
            modifiers: Modifiers::empty(),
        }
    }

    /// An Escape key press.
    pub fn escape() -> Self {
        WindowEvent::Key {
            symbol: KeySymbol::Escape,
            modifiers: Modifiers::empty(),
            direction: Direction::Press,
        }
    }

    /// Transition from `Visible` to `Dead`.
    pub fn destroyed() -> Self {
        WindowEvent::Lifecycle {
            from: Stage::Visible,
            to: Stage::Dead,
        }
    }
}

/// Messages multiplexed into the presentation loop's single inbox.
#[derive(Debug)]
pub(crate) enum Inbound {
    /// An OS event republished by the forwarder.
    Event(WindowEvent),
    /// A new externally rendered frame.
    Frame(Texture),
    /// The forwarder saw a terminal event and stopped.
    EventsClosed,
}

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("failed to create window: {0}")]
    WindowCreation(String),
}
