// src/painter/mod.rs
//! The drawing side: textures, the operations that draw into them, and the
//! thread that executes operation sequences and hands finished frames to the
//! presentation loop.

mod actor;
mod operation;
mod texture;


pub use actor::{PainterActor, PainterError};
pub use operation::{Figure, FigureSet, FigureStamp, Operation, Translate, FIGURE_EXTENT};
pub use texture::Texture;
