// src/color.rs

//! Defines color-related types (`NamedColor`, `Color`) shared by the painter
//! operations, the textures they draw into, and the placeholder drawing.

use serde::{Deserialize, Serialize};

/// The fixed palette the command language and the placeholder draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    White,
    Red,
    Green,
    Yellow,
}

impl NamedColor {
    /// Returns the concrete RGBA value of this named color.
    pub fn to_color(self) -> Color {
        match self {
            NamedColor::Black => Color::rgb(0, 0, 0),
            NamedColor::White => Color::rgb(255, 255, 255),
            NamedColor::Red => Color::rgb(255, 0, 0),
            NamedColor::Green => Color::rgb(0, 255, 0),
            NamedColor::Yellow => Color::rgb(255, 255, 0),
        }
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        named.to_color()
    }
}

/// An 8-bit-per-channel RGBA color.
///
/// Pixels are written with `Src` semantics: the destination pixel is replaced,
/// never blended, so alpha is carried along but not interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0xff }
    }
}

impl Default for Color {
    /// Returns opaque black, the color a freshly reset screen shows.
    fn default() -> Self {
        Color::rgb(0, 0, 0)
    }
}
