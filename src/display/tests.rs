// src/display/tests.rs

use super::*;
use crate::color::{Color, NamedColor};
use crate::config::{DisplayConfig, PresenterConfig};
use crate::geometry::Size;
use crate::keys::{Direction, KeySymbol, Modifiers};
use crate::painter::Texture;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use test_log::test;

const TIMEOUT: Duration = Duration::from_secs(5);
const WINDOW_SIZE: Size = Size::new(300, 300);

// --- Test Harness ---

struct Harness {
    screen: HeadlessScreen,
    frames: FrameSender,
    handle: JoinHandle<Result<(), PresenterError>>,
}

impl Harness {
    fn start() -> Self {
        Self::start_with(Presenter::new(
            &DisplayConfig::default(),
            &PresenterConfig::default(),
        ))
    }

    fn start_with(presenter: Presenter) -> Self {
        let screen = HeadlessScreen::new(WINDOW_SIZE);
        let frames = presenter.frame_sender();
        let loop_screen = screen.clone();
        let handle = thread::spawn(move || presenter.run(&loop_screen));
        Harness {
            screen,
            frames,
            handle,
        }
    }

    fn window(&self) -> Arc<HeadlessWindow> {
        let deadline = Instant::now() + TIMEOUT;
        loop {
            if let Some(window) = self.screen.window() {
                return window;
            }
            assert!(Instant::now() < deadline, "window was never created");
            thread::sleep(Duration::from_millis(1));
        }
    }

    fn await_publishes(&self, count: usize) -> Arc<HeadlessWindow> {
        let window = self.window();
        assert!(
            window.wait_for_publishes(count, TIMEOUT),
            "expected {} publishes, saw {}",
            count,
            window.publish_count()
        );
        window
    }

    fn stop_with(self, event: WindowEvent) -> (HeadlessScreen, FrameSender) {
        self.screen.inject(event);
        self.handle
            .join()
            .expect("presenter thread panicked")
            .expect("presenter failed");
        (self.screen, self.frames)
    }

    fn stop(self) -> (HeadlessScreen, FrameSender) {
        self.stop_with(WindowEvent::escape())
    }
}

fn color_at(window: &HeadlessWindow, x: i32, y: i32) -> Color {
    window.front_buffer().pixel(x, y).expect("pixel inside window")
}

fn solid(size: Size, color: Color) -> Texture {
    let mut texture = Texture::new(size);
    texture.fill(texture.bounds(), color);
    texture
}

// --- Event Classification ---

#[test]
fn terminal_events_are_destroy_and_escape() {
    assert!(WindowEvent::destroyed().is_terminal());
    assert!(WindowEvent::escape().is_terminal());
    assert!(WindowEvent::Key {
        symbol: KeySymbol::Escape,
        modifiers: Modifiers::SHIFT,
        direction: Direction::Release,
    }
    .is_terminal());

    assert!(!WindowEvent::Lifecycle {
        from: Stage::Visible,
        to: Stage::Focused,
    }
    .is_terminal());
    assert!(!WindowEvent::Key {
        symbol: KeySymbol::Char('q'),
        modifiers: Modifiers::empty(),
        direction: Direction::Press,
    }
    .is_terminal());
    assert!(!WindowEvent::Key {
        symbol: KeySymbol::Unknown,
        modifiers: Modifiers::CONTROL | Modifiers::SHIFT,
        direction: Direction::Press,
    }
    .is_terminal());
    assert!(!WindowEvent::Paint.is_terminal());
    assert!(!WindowEvent::Error("x".into()).is_terminal());
}

// --- Placeholder ---

#[test]
fn placeholder_is_published_before_any_frame() {
    let harness = Harness::start();
    let window = harness.await_publishes(1);

    let green = NamedColor::Green.to_color();
    let yellow = NamedColor::Yellow.to_color();
    let white = NamedColor::White.to_color();

    // "T" centred on the initial cursor rectangle (0,0)-(200,200).
    assert_eq!(color_at(&window, 100, 100), yellow);
    assert_eq!(color_at(&window, 100, 30), yellow);
    assert_eq!(color_at(&window, 50, 100), green);
    assert_eq!(color_at(&window, 250, 250), green);
    // Border is drawn last, over the crossbar.
    assert_eq!(color_at(&window, 150, 5), white);
    assert_eq!(color_at(&window, 5, 150), white);
    assert_eq!(color_at(&window, 295, 150), white);

    harness.stop();
}

#[test]
fn left_click_recentres_placeholder() {
    let harness = Harness::start();
    harness.await_publishes(1);

    harness.screen.inject(WindowEvent::left_click(200.0, 200.0));
    let window = harness.await_publishes(2);

    assert_eq!(color_at(&window, 200, 200), NamedColor::Yellow.to_color());
    assert_eq!(color_at(&window, 100, 100), NamedColor::Green.to_color());
    assert_eq!(color_at(&window, 292, 292), NamedColor::White.to_color());

    harness.stop();
}

#[test]
fn right_click_and_release_do_not_repaint() {
    let harness = Harness::start();
    harness.await_publishes(1);

    harness.screen.inject(WindowEvent::Mouse {
        x: 10.0,
        y: 10.0,
        button: MouseButton::Right,
        direction: Direction::Press,
        modifiers: Modifiers::empty(),
    });
    harness.screen.inject(WindowEvent::Mouse {
        x: 10.0,
        y: 10.0,
        button: MouseButton::Left,
        direction: Direction::Release,
        modifiers: Modifiers::empty(),
    });
    let (screen, _) = harness.stop();

    let window = screen.window().unwrap();
    assert_eq!(window.publish_count(), 1);
}

// --- Frames ---

#[test]
fn frame_supersedes_placeholder_permanently() {
    let harness = Harness::start();
    harness.await_publishes(1);

    let red = NamedColor::Red.to_color();
    harness
        .frames
        .submit(solid(Size::new(10, 10), red))
        .unwrap();
    let window = harness.await_publishes(2);
    assert_eq!(color_at(&window, 0, 0), red);
    assert_eq!(color_at(&window, 150, 150), red);
    assert_eq!(color_at(&window, 299, 299), red);

    harness.screen.inject(WindowEvent::left_click(50.0, 50.0));
    let window = harness.await_publishes(3);
    assert_eq!(color_at(&window, 50, 50), red);
    assert_eq!(color_at(&window, 5, 5), red);

    harness.stop();
}

#[test]
fn latest_frame_wins() {
    let harness = Harness::start();
    harness.await_publishes(1);

    harness
        .frames
        .submit(solid(Size::new(4, 4), NamedColor::Red.to_color()))
        .unwrap();
    harness.await_publishes(2);
    harness
        .frames
        .submit(solid(Size::new(4, 4), NamedColor::White.to_color()))
        .unwrap();
    let window = harness.await_publishes(3);
    assert_eq!(color_at(&window, 120, 120), NamedColor::White.to_color());

    harness.stop();
}

// --- Other Events ---

#[test]
fn resize_updates_bounds_without_repaint() {
    let harness = Harness::start();
    harness.await_publishes(1);

    harness.screen.inject(WindowEvent::Size {
        width_px: 100,
        height_px: 100,
    });
    harness.screen.inject(WindowEvent::Paint);
    let window = harness.await_publishes(2);
    // Right border of the 100x100 placeholder, drawn over the old stem.
    assert_eq!(color_at(&window, 95, 50), NamedColor::White.to_color());

    let (screen, _) = harness.stop();
    assert_eq!(screen.window().unwrap().publish_count(), 2);
}

#[test]
fn error_events_are_not_fatal() {
    let harness = Harness::start();
    harness.await_publishes(1);

    harness.screen.inject(WindowEvent::Error("lost device".to_string()));
    harness.screen.inject(WindowEvent::Paint);
    harness.await_publishes(2);

    harness.stop();
}

// --- Lifecycle ---

#[test]
fn destroy_closes_the_loop_and_releases_the_window() {
    let harness = Harness::start();
    harness.await_publishes(1);
    assert_eq!(harness.frames.state(), LoopState::Running);

    let (screen, frames) = harness.stop_with(WindowEvent::destroyed());

    assert!(screen.window().unwrap().is_released());
    assert_eq!(frames.state(), LoopState::Closed);
    let red = NamedColor::Red.to_color();
    assert!(matches!(
        frames.submit(solid(Size::new(1, 1), red)),
        Err(PresenterError::Closed)
    ));
    assert!(matches!(
        frames.try_submit(solid(Size::new(1, 1), red)),
        Err(PresenterError::Closed)
    ));
}

#[test]
fn submitting_while_the_loop_terminates_never_deadlocks() {
    let harness = Harness::start();
    harness.await_publishes(1);

    let frames = harness.frames.clone();
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || loop {
        if let Err(e) = frames.submit(Texture::new(Size::new(4, 4))) {
            let _ = done_tx.send(e);
            break;
        }
    });

    harness.stop();
    let err = done_rx
        .recv_timeout(TIMEOUT)
        .expect("submitter stayed blocked after the loop closed");
    assert!(matches!(err, PresenterError::Closed));
}

#[test]
fn window_creation_failure_is_reported() {
    let screen = HeadlessScreen::refusing_windows(WINDOW_SIZE);
    let presenter = Presenter::new(&DisplayConfig::default(), &PresenterConfig::default());
    let frames = presenter.frame_sender();

    let err = presenter.run(&screen).unwrap_err();
    assert!(matches!(err, PresenterError::WindowCreation(_)));
    assert!(screen.window().is_none());
    assert_eq!(frames.state(), LoopState::Closed);
    assert!(matches!(
        frames.submit(Texture::new(Size::new(1, 1))),
        Err(PresenterError::Closed)
    ));
}

#[test]
fn screen_ready_callback_runs_before_the_loop() {
    let presenter = Presenter::new(&DisplayConfig::default(), &PresenterConfig::default());
    let frames = presenter.frame_sender();
    let (ready_tx, ready_rx) = mpsc::channel();
    let presenter = presenter.on_screen_ready(move |screen| {
        let texture = screen.new_texture(Size::new(8, 6));
        let _ = ready_tx.send((frames.state(), texture.size()));
    });

    let harness = Harness::start_with(presenter);
    let (state, size) = ready_rx.recv_timeout(TIMEOUT).unwrap();
    assert_eq!(state, LoopState::Uninitialized);
    assert_eq!(size, Size::new(8, 6));
    assert!(ready_rx.try_recv().is_err());

    harness.await_publishes(1);
    harness.stop();
}

#[test]
fn destroy_from_screen_ready_callback_ends_the_loop() {
    let screen = HeadlessScreen::new(WINDOW_SIZE);
    let callback_screen = screen.clone();
    let presenter = Presenter::new(&DisplayConfig::default(), &PresenterConfig::default())
        .on_screen_ready(move |_| callback_screen.inject(WindowEvent::destroyed()));
    let frames = presenter.frame_sender();

    let loop_screen = screen.clone();
    let handle = thread::spawn(move || presenter.run(&loop_screen));
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = done_tx.send(handle.join());
    });

    let result = done_rx
        .recv_timeout(TIMEOUT)
        .expect("loop kept running after its window was destroyed");
    assert!(matches!(result, Ok(Ok(()))));
    assert_eq!(frames.state(), LoopState::Closed);
    assert!(screen.window().unwrap().is_released());
}

#[test]
fn debug_mode_forwards_events_unchanged() {
    let display = DisplayConfig {
        debug: true,
        ..DisplayConfig::default()
    };
    let harness = Harness::start_with(Presenter::new(&display, &PresenterConfig::default()));
    let window = harness.await_publishes(1);
    assert_eq!(window.title(), display.title);

    harness.screen.inject(WindowEvent::Paint);
    harness.await_publishes(2);
    harness.stop();
}
