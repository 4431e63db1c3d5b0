//! Headless in-memory screen and window.
//!
//! Windows keep a back buffer that drawing goes to and a front buffer that
//! `publish` copies it into. Events are queued in-process; `HeadlessScreen::inject`
//! plays the role of the user and the OS.

use crate::color::Color;
use crate::display::messages::{DisplayError, Stage, WindowEvent};
use crate::display::window::{Screen, Window, WindowOptions};
use crate::geometry::{Rect, Size};
use crate::painter::Texture;
use log::{info, trace, warn};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct ScreenShared {
    windows: Mutex<Vec<Arc<HeadlessWindow>>>,
}

/// A screen whose windows have the given size.
#[derive(Clone)]
pub struct HeadlessScreen {
    size: Size,
    refuse_windows: bool,
    shared: Arc<ScreenShared>,
}

impl HeadlessScreen {
    pub fn new(size: Size) -> Self {
        info!("HeadlessScreen::new() {}x{}", size.width, size.height);
        HeadlessScreen {
            size,
            refuse_windows: false,
            shared: Arc::default(),
        }
    }

    /// A screen on which window creation always fails.
    pub fn refusing_windows(size: Size) -> Self {
        HeadlessScreen {
            refuse_windows: true,
            ..Self::new(size)
        }
    }

    /// The most recently created window.
    pub fn window(&self) -> Option<Arc<HeadlessWindow>> {
        lock(&self.shared.windows).last().cloned()
    }

    /// Delivers `event` to every window created on this screen.
    pub fn inject(&self, event: WindowEvent) {
        let windows = lock(&self.shared.windows);
        if windows.is_empty() {
            warn!("HeadlessScreen: No window to deliver {:?} to", event);
        }
        for window in windows.iter() {
            window.send(event.clone());
        }
    }
}

impl Screen for HeadlessScreen {
    fn new_window(&self, options: &WindowOptions) -> Result<Arc<dyn Window>, DisplayError> {
        if self.refuse_windows {
            return Err(DisplayError::WindowCreation(format!(
                "headless screen refuses window '{}'",
                options.title
            )));
        }
        let window = Arc::new(HeadlessWindow::new(&options.title, self.size));
        lock(&self.shared.windows).push(Arc::clone(&window));
        Ok(window)
    }
}

/// An in-memory window.
pub struct HeadlessWindow {
    title: String,
    events_tx: Sender<WindowEvent>,
    events_rx: Mutex<Receiver<WindowEvent>>,
    back: Mutex<Texture>,
    front: Mutex<Texture>,
    published: Mutex<usize>,
    published_changed: Condvar,
    released: Mutex<bool>,
}

impl HeadlessWindow {
    /// Creates the window and queues the events a freshly mapped window
    /// receives: it becomes visible, learns its size, and is asked to paint.
    fn new(title: &str, size: Size) -> Self {
        info!("HeadlessWindow: Creating '{}' {}x{}", title, size.width, size.height);
        let (events_tx, events_rx) = channel();
        let startup = [
            WindowEvent::Lifecycle {
                from: Stage::Dead,
                to: Stage::Visible,
            },
            WindowEvent::Size {
                width_px: size.width,
                height_px: size.height,
            },
            WindowEvent::Paint,
        ];
        for event in startup {
            // The receiver lives in the same struct, so this cannot fail.
            let _ = events_tx.send(event);
        }

        HeadlessWindow {
            title: title.to_string(),
            events_tx,
            events_rx: Mutex::new(events_rx),
            back: Mutex::new(Texture::new(size)),
            front: Mutex::new(Texture::new(size)),
            published: Mutex::new(0),
            published_changed: Condvar::new(),
            released: Mutex::new(false),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// A copy of the last published contents.
    pub fn front_buffer(&self) -> Texture {
        lock(&self.front).clone()
    }

    pub fn publish_count(&self) -> usize {
        *lock(&self.published)
    }

    /// Blocks until at least `count` publishes happened or `timeout` elapsed.
    /// Returns whether the count was reached.
    pub fn wait_for_publishes(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut published = lock(&self.published);
        while *published < count {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            published = self
                .published_changed
                .wait_timeout(published, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        true
    }

    pub fn is_released(&self) -> bool {
        *lock(&self.released)
    }
}

impl Window for HeadlessWindow {
    fn next_event(&self) -> WindowEvent {
        match lock(&self.events_rx).recv() {
            Ok(event) => event,
            Err(_) => WindowEvent::destroyed(),
        }
    }

    fn send(&self, event: WindowEvent) {
        trace!("HeadlessWindow: Queued {:?}", event);
        let _ = self.events_tx.send(event);
    }

    fn fill(&self, rect: Rect, color: Color) {
        lock(&self.back).fill(rect, color);
    }

    fn scale(&self, dst: Rect, src: &Texture, src_rect: Rect) {
        lock(&self.back).scale_from(dst, src, src_rect);
    }

    fn publish(&self) {
        let back = lock(&self.back);
        lock(&self.front).clone_from(&back);
        drop(back);

        let mut published = lock(&self.published);
        *published += 1;
        trace!("HeadlessWindow: Published frame {}", *published);
        self.published_changed.notify_all();
    }

    fn release(&self) {
        info!("HeadlessWindow: Releasing '{}'", self.title);
        *lock(&self.released) = true;
    }
}
