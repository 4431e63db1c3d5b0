// src/painter/actor.rs
//! PainterActor - Dedicated thread executing operation batches.
//!
//! Simple work queue pattern: receives finalized operation sequences, applies
//! them in order to a working texture, and delivers a copy of that texture to
//! the presentation loop whenever an operation reports it ready.
//!
//! Threading model:
//! - Owns: the working texture
//! - Delivery blocks until the presentation loop accepts the frame, so at most
//!   one frame is in flight
//! - Stops when the batch channel closes or the presentation loop has closed

use super::operation::Operation;
use super::texture::Texture;
use crate::display::FrameSender;
use log::*;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PainterError {
    #[error("failed to spawn painter thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("painter thread has stopped")]
    Stopped,
    #[error("painter thread panicked")]
    Panicked,
}

/// Handle to the painter thread. Dropping it closes the batch channel and
/// waits for the queued batches to finish.
pub struct PainterActor {
    batch_tx: Option<Sender<Vec<Operation>>>,
    thread_handle: Option<JoinHandle<Texture>>,
}

impl PainterActor {
    /// Spawns the painter thread drawing into `texture` and delivering
    /// frames through `frames`.
    pub fn spawn(texture: Texture, frames: FrameSender) -> Result<Self, PainterError> {
        info!("PainterActor: Spawning background thread");
        let (batch_tx, batch_rx) = channel();

        let thread_handle = thread::Builder::new()
            .name("painter".to_string())
            .spawn(move || Self::run(texture, batch_rx, frames))
            .map_err(PainterError::Spawn)?;

        Ok(Self {
            batch_tx: Some(batch_tx),
            thread_handle: Some(thread_handle),
        })
    }

    /// Queues a batch for execution.
    pub fn post(&self, batch: Vec<Operation>) -> Result<(), PainterError> {
        self.batch_tx
            .as_ref()
            .ok_or(PainterError::Stopped)?
            .send(batch)
            .map_err(|_| PainterError::Stopped)
    }

    /// Waits for every queued batch to run and returns the working texture.
    pub fn finish(mut self) -> Result<Texture, PainterError> {
        self.batch_tx.take();
        match self.thread_handle.take() {
            Some(handle) => handle.join().map_err(|_| PainterError::Panicked),
            None => Err(PainterError::Stopped),
        }
    }

    fn run(mut texture: Texture, batch_rx: Receiver<Vec<Operation>>, frames: FrameSender) -> Texture {
        info!("PainterActor: Thread started");

        while let Ok(batch) = batch_rx.recv() {
            debug!("PainterActor: Executing {} operations", batch.len());
            for op in &batch {
                if !op.apply(&mut texture) {
                    continue;
                }
                if let Err(e) = frames.submit(texture.clone()) {
                    warn!("PainterActor: Failed to deliver frame: {}", e);
                    info!("PainterActor: Thread stopped");
                    return texture;
                }
                trace!("PainterActor: Frame delivered");
            }
        }

        info!("PainterActor: Batch channel closed, thread stopped");
        texture
    }
}

impl Drop for PainterActor {
    fn drop(&mut self) {
        self.batch_tx.take();
        if let Some(handle) = self.thread_handle.take() {
            if let Err(e) = handle.join() {
                error!("PainterActor thread panicked: {:?}", e);
            }
        }
    }
}
