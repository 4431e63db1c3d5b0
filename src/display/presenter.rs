// src/display/presenter.rs
//! Presenter - the presentation loop.
//!
//! Owns one window and keeps it in sync with user input and with frames
//! rendered elsewhere. Two producers feed a single consumer:
//! - the event forwarder thread, republishing OS events in delivery order
//! - any number of [`FrameSender`]s, delivering rendered textures
//!
//! Both share one rendezvous inbox (capacity 0), so a producer is released
//! only when the loop takes its message, and the loop handles exactly one
//! message at a time. `WindowState` is touched by the loop thread only.

use super::messages::{DisplayError, Inbound, MouseButton, WindowEvent};
use super::window::{Screen, Window, WindowOptions};
use crate::color::NamedColor;
use crate::config::{DisplayConfig, PresenterConfig};
use crate::geometry::{t_shape, Point, Rect, Size};
use crate::keys::Direction;
use crate::painter::Texture;
use log::*;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PresenterError {
    #[error("failed to initialize the presentation window: {0}")]
    WindowCreation(#[source] DisplayError),
    #[error("failed to spawn event forwarder: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("presentation loop is closed")]
    Closed,
    #[error("presentation loop is busy")]
    Busy,
}

/// Where the presentation loop is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    Terminating,
    Closed,
}

type SharedState = Arc<Mutex<LoopState>>;

fn read_state(state: &SharedState) -> LoopState {
    *state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn set_state(state: &SharedState, next: LoopState) {
    debug!("Presenter: {:?}", next);
    *state.lock().unwrap_or_else(PoisonError::into_inner) = next;
}

/// Delivers rendered frames to a [`Presenter`].
#[derive(Clone)]
pub struct FrameSender {
    inbox: SyncSender<Inbound>,
    state: SharedState,
}

impl FrameSender {
    /// Hands `texture` to the loop, blocking until the loop takes it.
    ///
    /// Fails with `Closed` once the loop has begun terminating, including
    /// when the loop terminates while this call is blocked.
    pub fn submit(&self, texture: Texture) -> Result<(), PresenterError> {
        if self.is_closing() {
            return Err(PresenterError::Closed);
        }
        self.inbox
            .send(Inbound::Frame(texture))
            .map_err(|_| PresenterError::Closed)
    }

    /// Hands `texture` to the loop only if it is waiting for input right now.
    pub fn try_submit(&self, texture: Texture) -> Result<(), PresenterError> {
        if self.is_closing() {
            return Err(PresenterError::Closed);
        }
        self.inbox
            .try_send(Inbound::Frame(texture))
            .map_err(|e| match e {
                TrySendError::Full(_) => PresenterError::Busy,
                TrySendError::Disconnected(_) => PresenterError::Closed,
            })
    }

    pub fn state(&self) -> LoopState {
        read_state(&self.state)
    }

    fn is_closing(&self) -> bool {
        matches!(self.state(), LoopState::Terminating | LoopState::Closed)
    }
}

type ReadyCallback = Box<dyn FnOnce(&dyn Screen) + Send>;

/// What the loop knows about its window.
struct WindowState {
    /// Latest bounds, from `Size` events only.
    size: Size,
    /// Anchors the placeholder; recentred on every left click.
    cursor_rect: Rect,
    /// Latest frame. Once set, the placeholder is never drawn again.
    texture: Option<Texture>,
    border_px: i32,
}

impl WindowState {
    fn handle_event(&mut self, event: WindowEvent, window: &dyn Window) {
        match event {
            WindowEvent::Size {
                width_px,
                height_px,
            } => {
                self.size = Size::new(width_px, height_px);
            }
            WindowEvent::Error(message) => {
                error!("Presenter: Window error: {}", message);
            }
            WindowEvent::Mouse {
                x,
                y,
                button: MouseButton::Left,
                direction: Direction::Press,
                ..
            } => {
                self.cursor_rect = self.cursor_rect.centered_at(Point::new(x as i32, y as i32));
                window.send(WindowEvent::Paint);
            }
            WindowEvent::Paint => {
                match &self.texture {
                    None => self.draw_placeholder(window),
                    Some(texture) => window.scale(self.size.bounds(), texture, texture.bounds()),
                }
                window.publish();
            }
            other => trace!("Presenter: Ignoring {:?}", other),
        }
    }

    /// Green background, a yellow "T" half the window in size centred on the
    /// cursor rectangle, and a white border.
    fn draw_placeholder(&self, window: &dyn Window) {
        let bounds = self.size.bounds();
        window.fill(bounds, NamedColor::Green.to_color());

        let yellow = NamedColor::Yellow.to_color();
        for bar in t_shape(self.cursor_rect.center(), bounds.dx() / 2, bounds.dy() / 2) {
            window.fill(bar, yellow);
        }

        let white = NamedColor::White.to_color();
        for strip in bounds.border(self.border_px) {
            window.fill(strip, white);
        }
    }
}

pub struct Presenter {
    options: WindowOptions,
    debug: bool,
    border_px: i32,
    cursor_size: Size,
    on_screen_ready: Option<ReadyCallback>,
    inbox_tx: SyncSender<Inbound>,
    inbox_rx: Receiver<Inbound>,
    state: SharedState,
}

impl Presenter {
    pub fn new(display: &DisplayConfig, config: &PresenterConfig) -> Self {
        let (inbox_tx, inbox_rx) = sync_channel(0);
        Presenter {
            options: WindowOptions {
                title: display.title.clone(),
                size: display.size(),
            },
            debug: display.debug,
            border_px: i32::from(config.border_px),
            cursor_size: Size::new(
                u32::from(config.cursor_width_px),
                u32::from(config.cursor_height_px),
            ),
            on_screen_ready: None,
            inbox_tx,
            inbox_rx,
            state: Arc::new(Mutex::new(LoopState::Uninitialized)),
        }
    }

    /// Registers a callback run once the window exists, before the loop
    /// starts consuming events.
    pub fn on_screen_ready<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&dyn Screen) + Send + 'static,
    {
        self.on_screen_ready = Some(Box::new(callback));
        self
    }

    /// A handle for delivering frames. Frames submitted before `run` starts
    /// block until the loop is running.
    pub fn frame_sender(&self) -> FrameSender {
        FrameSender {
            inbox: self.inbox_tx.clone(),
            state: Arc::clone(&self.state),
        }
    }

    pub fn state(&self) -> LoopState {
        read_state(&self.state)
    }

    /// Creates the window and runs the loop until the window is destroyed or
    /// Escape is pressed.
    pub fn run(self, screen: &dyn Screen) -> Result<(), PresenterError> {
        let Presenter {
            options,
            debug,
            border_px,
            cursor_size,
            on_screen_ready,
            inbox_tx,
            inbox_rx,
            state,
        } = self;

        let window = match screen.new_window(&options) {
            Ok(window) => window,
            Err(e) => {
                error!("Presenter: {}", e);
                set_state(&state, LoopState::Closed);
                return Err(PresenterError::WindowCreation(e));
            }
        };
        info!("Presenter: Window '{}' created", options.title);

        if let Some(callback) = on_screen_ready {
            callback(screen);
        }
        set_state(&state, LoopState::Running);

        let forwarder = match spawn_forwarder(Arc::clone(&window), inbox_tx, debug) {
            Ok(handle) => handle,
            Err(e) => {
                shut_down(&state, inbox_rx, window.as_ref());
                set_state(&state, LoopState::Closed);
                return Err(e);
            }
        };

        let mut window_state = WindowState {
            size: Size::default(),
            cursor_rect: cursor_size.bounds(),
            texture: None,
            border_px,
        };

        loop {
            match inbox_rx.recv() {
                Ok(Inbound::Event(event)) => window_state.handle_event(event, window.as_ref()),
                Ok(Inbound::Frame(texture)) => {
                    trace!("Presenter: Adopted frame {:?}", texture.size());
                    window_state.texture = Some(texture);
                    window.send(WindowEvent::Paint);
                }
                Ok(Inbound::EventsClosed) => {
                    info!("Presenter: Event stream ended");
                    break;
                }
                Err(_) => {
                    warn!("Presenter: Inbox disconnected");
                    break;
                }
            }
        }

        shut_down(&state, inbox_rx, window.as_ref());
        if forwarder.join().is_err() {
            error!("Presenter: Event forwarder panicked");
        }
        set_state(&state, LoopState::Closed);
        Ok(())
    }
}

/// Stops accepting frames, releasing any blocked submitter, then frees the window.
fn shut_down(state: &SharedState, inbox_rx: Receiver<Inbound>, window: &dyn Window) {
    set_state(state, LoopState::Terminating);
    drop(inbox_rx);
    window.release();
}

/// Republishes window events on the inbox until a terminal event arrives,
/// then marks the end of the stream.
fn spawn_forwarder(
    window: Arc<dyn Window>,
    inbox: SyncSender<Inbound>,
    debug: bool,
) -> Result<JoinHandle<()>, PresenterError> {
    thread::Builder::new()
        .name("event-forwarder".to_string())
        .spawn(move || loop {
            let event = window.next_event();
            if debug {
                debug!("new event: {:?}", event);
            }
            if event.is_terminal() {
                info!("Event forwarder: Terminal event {:?}", event);
                let _ = inbox.send(Inbound::EventsClosed);
                break;
            }
            if inbox.send(Inbound::Event(event)).is_err() {
                break;
            }
        })
        .map_err(PresenterError::Spawn)
}
