// src/geometry.rs

//! Integer pixel geometry shared by textures, windows, and drawing operations.
//!
//! Rectangles are half-open: `min` is inclusive, `max` is exclusive. A
//! rectangle whose `max` is not strictly greater than `min` on both axes is
//! empty and draws nothing.
//!
//! Coordinate arithmetic saturates at the `i32` range, so shapes far off
//! any surface degrade to clipped or empty rectangles instead of wrapping.

use serde::{Deserialize, Serialize};

/// A point in pixel space. May lie outside any surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Width and height of a surface in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }

    /// The rectangle `(0, 0)-(width, height)`.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Rect {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    pub fn dx(&self) -> i32 {
        self.max.x.saturating_sub(self.min.x)
    }

    pub fn dy(&self) -> i32 {
        self.max.y.saturating_sub(self.min.y)
    }

    pub fn is_empty(&self) -> bool {
        self.dx() <= 0 || self.dy() <= 0
    }

    pub fn center(&self) -> Point {
        Point::new(midpoint(self.min.x, self.max.x), midpoint(self.min.y, self.max.y))
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// The largest rectangle contained in both `self` and `other`.
    /// Returns an empty rectangle when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let r = Rect::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        );
        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.min.x.saturating_add(dx),
            self.min.y.saturating_add(dy),
            self.max.x.saturating_add(dx),
            self.max.y.saturating_add(dy),
        )
    }

    /// Same size, moved so that its center lands on `p`.
    pub fn centered_at(&self, p: Point) -> Rect {
        let c = self.center();
        self.translate(p.x.saturating_sub(c.x), p.y.saturating_sub(c.y))
    }

    /// The four strips of width `w` lining the inside of this rectangle:
    /// top, bottom, left, right. Left and right exclude the corners already
    /// covered by top and bottom.
    pub fn border(&self, w: i32) -> [Rect; 4] {
        let (inner_top, inner_bottom) = (self.min.y.saturating_add(w), self.max.y.saturating_sub(w));
        [
            Rect::new(self.min.x, self.min.y, self.max.x, inner_top),
            Rect::new(self.min.x, inner_bottom, self.max.x, self.max.y),
            Rect::new(self.min.x, inner_top, self.min.x.saturating_add(w), inner_bottom),
            Rect::new(self.max.x.saturating_sub(w), inner_top, self.max.x, inner_bottom),
        ]
    }
}

/// The two bars of a "T" glyph whose stem is centered on `center`.
///
/// Returns `[stem, crossbar]`. The stem is a third of `width` wide and
/// `height` tall; the crossbar is `width` wide, a third of `height` tall, and
/// centered on the top edge of the stem.
pub fn t_shape(center: Point, width: i32, height: i32) -> [Rect; 2] {
    let stem_width = width / 3;
    let bar_height = height / 3;
    let top = center.y.saturating_sub(height / 2);

    let stem = Rect::new(
        center.x.saturating_sub(stem_width / 2),
        top,
        center.x.saturating_add(stem_width / 2),
        center.y.saturating_add(height / 2),
    );
    let crossbar = Rect::new(
        center.x.saturating_sub(width / 2),
        top.saturating_sub(bar_height / 2),
        center.x.saturating_add(width / 2),
        top.saturating_add(bar_height / 2),
    );
    [stem, crossbar]
}

fn midpoint(a: i32, b: i32) -> i32 {
    // Always between `a` and `b`, so the narrowing cannot truncate.
    (i64::from(a) + (i64::from(b) - i64::from(a)) / 2) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_clips_to_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -5, 20, 5);
        assert_eq!(a.intersect(&b), Rect::new(5, 0, 10, 5));
        assert!(a.intersect(&Rect::new(20, 20, 30, 30)).is_empty());
    }

    #[test]
    fn centered_at_keeps_size() {
        let r = Rect::new(0, 0, 200, 200).centered_at(Point::new(50, 70));
        assert_eq!(r, Rect::new(-50, -30, 150, 170));
        assert_eq!(r.center(), Point::new(50, 70));
    }

    #[test]
    fn border_lines_the_inside() {
        let [top, bottom, left, right] = Rect::new(0, 0, 100, 50).border(10);
        assert_eq!(top, Rect::new(0, 0, 100, 10));
        assert_eq!(bottom, Rect::new(0, 40, 100, 50));
        assert_eq!(left, Rect::new(0, 10, 10, 40));
        assert_eq!(right, Rect::new(90, 10, 100, 40));
    }

    #[test]
    fn t_shape_crossbar_sits_on_stem_top() {
        let [stem, crossbar] = t_shape(Point::new(100, 100), 90, 60);
        assert_eq!(stem, Rect::new(85, 70, 115, 130));
        assert_eq!(crossbar, Rect::new(55, 60, 145, 80));
    }

    #[test]
    fn arithmetic_saturates_at_the_coordinate_range() {
        let [stem, crossbar] = t_shape(Point::new(i32::MAX, i32::MIN), 200, 200);
        assert_eq!(stem.max.x, i32::MAX);
        assert_eq!(stem.min.y, i32::MIN);
        assert_eq!(crossbar.min.y, i32::MIN);

        let wide = Rect::new(i32::MIN, 0, i32::MAX, 10);
        assert_eq!(wide.dx(), i32::MAX);
        assert_eq!(wide.center(), Point::new(-1, 5));
        assert_eq!(
            wide.translate(10, 0),
            Rect::new(i32::MIN + 10, 0, i32::MAX, 10)
        );

        let far = Rect::new(0, 0, 200, 200).centered_at(Point::new(i32::MAX, 0));
        assert_eq!(far.max.x, i32::MAX);
        let [top, ..] = wide.border(i32::MAX);
        assert_eq!(top, Rect::new(i32::MIN, 0, i32::MAX, i32::MAX));
    }
}
