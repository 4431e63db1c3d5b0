// src/lib.rs

//! A small drawing pipeline: a line-oriented command language is interpreted
//! into drawing operations, a painter thread executes them into textures,
//! and a presentation loop composites delivered frames into a window while
//! reacting to window events.

pub mod color;
pub mod config;
pub mod display;
pub mod geometry;
pub mod keys;
pub mod lang;
pub mod painter;
