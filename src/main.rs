// src/main.rs

use painter::{
    config::CONFIG,
    display::{FrameSender, HeadlessScreen, Presenter, WindowEvent},
    lang::{Interpreter, MoveBinding},
    painter::{PainterActor, Texture},
};

use anyhow::{Context, Result};
use log::{error, info, warn};
use std::io::Read;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

/// One command script; each is interpreted as a single batch.
struct Script {
    name: String,
    text: String,
}

/// Main entry point for the `painter` application.
fn main() {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    info!("Starting painter...");
    let config = &*CONFIG;

    let scripts = read_scripts(std::env::args().skip(1))?;
    info!("Loaded {} script(s)", scripts.len());

    let screen = HeadlessScreen::new(config.display.size());
    let presenter = Presenter::new(&config.display, &config.presenter);
    let frames = presenter.frame_sender();

    let (script_tx, script_rx) = mpsc::channel::<JoinHandle<Result<()>>>();
    let script_screen = screen.clone();
    let close_screen = screen.clone();
    let texture_size = config.painter.texture_size();
    let move_binding = config.interpreter.move_binding;

    let presenter = presenter.on_screen_ready(move |s| {
        let texture = s.new_texture(texture_size);
        let spawned = thread::Builder::new()
            .name("script".to_string())
            .spawn(move || {
                let result = play_scripts(&scripts, texture, frames, move_binding);
                // The loop runs until its window goes away.
                script_screen.inject(WindowEvent::Paint);
                script_screen.inject(WindowEvent::destroyed());
                result
            });
        match spawned {
            Ok(handle) => {
                let _ = script_tx.send(handle);
            }
            Err(e) => {
                error!("Failed to spawn script thread: {}", e);
                // Nothing else will close the window.
                close_screen.inject(WindowEvent::destroyed());
            }
        }
    });

    // The presentation loop owns the main thread until the window closes.
    presenter
        .run(&screen)
        .context("Presentation loop failed")?;

    if let Ok(handle) = script_rx.try_recv() {
        match handle.join() {
            Ok(result) => result.context("Failed to play scripts")?,
            Err(_) => warn!("Script thread panicked"),
        }
    }

    let published = screen.window().map_or(0, |w| w.publish_count());
    info!("painter exited successfully after {} published frame(s).", published);
    Ok(())
}

fn read_scripts(paths: impl Iterator<Item = String>) -> Result<Vec<Script>> {
    let mut scripts = paths
        .map(|path| {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path))?;
            Ok(Script { name: path, text })
        })
        .collect::<Result<Vec<_>>>()?;

    if scripts.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read commands from stdin")?;
        scripts.push(Script {
            name: "<stdin>".to_string(),
            text,
        });
    }
    Ok(scripts)
}

/// Interprets each script as a batch and has the painter draw it.
/// A script that fails to parse is skipped; the others still run.
fn play_scripts(
    scripts: &[Script],
    texture: Texture,
    frames: FrameSender,
    move_binding: MoveBinding,
) -> Result<()> {
    let painter = PainterActor::spawn(texture, frames).context("Failed to start painter")?;
    let mut interpreter = Interpreter::with_move_binding(move_binding);

    for script in scripts {
        match interpreter.parse_stream(script.text.as_bytes()) {
            Ok(ops) => {
                info!("{}: {} operations", script.name, ops.len());
                painter
                    .post(ops)
                    .with_context(|| format!("Failed to queue {}", script.name))?;
            }
            Err(e) => error!("{}: {}", script.name, e),
        }
    }

    painter.finish().context("Painter did not finish cleanly")?;
    Ok(())
}
