// src/painter/texture.rs

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use std::fmt;

/// An owned RGBA pixel buffer that operations draw into and that the
/// presentation loop composites into its window.
#[derive(Clone, PartialEq, Eq)]
pub struct Texture {
    size: Size,
    pixels: Vec<Color>,
}

impl Texture {
    /// Creates a texture of `size` filled with opaque black.
    pub fn new(size: Size) -> Self {
        Texture {
            size,
            pixels: vec![Color::default(); size.area()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        self.size.bounds()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the texture.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.bounds().contains(Point::new(x, y)) {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Replaces every pixel inside `rect` with `color`. The rectangle is
    /// clipped to the texture bounds.
    pub fn fill(&mut self, rect: Rect, color: Color) {
        let clipped = rect.intersect(&self.bounds());
        if clipped.is_empty() {
            return;
        }
        for y in clipped.min.y..clipped.max.y {
            let start = self.index(clipped.min.x, y);
            let end = start + clipped.dx() as usize;
            self.pixels[start..end].fill(color);
        }
    }

    /// Nearest-neighbour scales `src_rect` of `src` onto `dst` of this texture.
    ///
    /// Destination pixels outside this texture, and source samples outside
    /// `src`, are skipped.
    pub fn scale_from(&mut self, dst: Rect, src: &Texture, src_rect: Rect) {
        if dst.is_empty() || src_rect.is_empty() {
            return;
        }
        let clipped = dst.intersect(&self.bounds());
        let (dw, dh) = (dst.dx() as i64, dst.dy() as i64);
        let (sw, sh) = (src_rect.dx() as i64, src_rect.dy() as i64);

        for y in clipped.min.y..clipped.max.y {
            let sy = src_rect.min.y + ((i64::from(y) - i64::from(dst.min.y)) * sh / dh) as i32;
            for x in clipped.min.x..clipped.max.x {
                let sx = src_rect.min.x + ((i64::from(x) - i64::from(dst.min.x)) * sw / dw) as i32;
                if let Some(color) = src.pixel(sx, sy) {
                    let i = self.index(x, y);
                    self.pixels[i] = color;
                }
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture").field("size", &self.size).finish()
    }
}
