// src/display/drivers/mod.rs

mod headless;

pub use headless::{HeadlessScreen, HeadlessWindow};
