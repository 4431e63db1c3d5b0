// src/painter/operation.rs

//! Drawing operations and the shared figure set they act on.

use super::texture::Texture;
use crate::color::{Color, NamedColor};
use crate::geometry::{t_shape, Point, Rect};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Width and height of the "T" glyph stamped for each figure.
pub const FIGURE_EXTENT: i32 = 200;

/// A figure placed by the `figure` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    pub position: Point,
    pub color: Color,
}

impl Figure {
    /// A figure in the command language's fixed color.
    pub fn new(x: i32, y: i32) -> Self {
        Figure {
            position: Point::new(x, y),
            color: NamedColor::Red.to_color(),
        }
    }

    fn draw(&self, texture: &mut Texture) {
        for bar in t_shape(self.position, FIGURE_EXTENT, FIGURE_EXTENT) {
            texture.fill(bar, self.color);
        }
    }
}

/// A growable arena of figures shared between the figure and move
/// operations that refer to it.
///
/// Cloning yields another handle to the same arena; figure positions seen
/// by a figure operation are whatever earlier move operations left there.
#[derive(Clone, Default)]
pub struct FigureSet {
    figures: Arc<Mutex<Vec<Figure>>>,
}

impl FigureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a figure and returns its index.
    pub fn push(&self, figure: Figure) -> usize {
        let mut figures = self.lock();
        figures.push(figure);
        figures.len() - 1
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Figure> {
        self.lock().get(index).copied()
    }

    /// A copy of the figures as they are right now.
    pub fn snapshot(&self) -> Vec<Figure> {
        self.lock().clone()
    }

    /// Whether both handles refer to the same arena.
    pub fn same_set(&self, other: &FigureSet) -> bool {
        Arc::ptr_eq(&self.figures, &other.figures)
    }

    /// Translates the first `limit` figures, or all of them when `limit` is `None`.
    /// Positions saturate at the coordinate range.
    fn translate(&self, limit: Option<usize>, dx: i32, dy: i32) {
        let mut figures = self.lock();
        let n = limit.map_or(figures.len(), |l| l.min(figures.len()));
        for figure in figures.iter_mut().take(n) {
            figure.position.x = figure.position.x.saturating_add(dx);
            figure.position.y = figure.position.y.saturating_add(dy);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Figure>> {
        self.figures.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for FigureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lock().iter()).finish()
    }
}

/// Stamps one figure of a [`FigureSet`] at its current position.
#[derive(Debug, Clone)]
pub struct FigureStamp {
    figures: FigureSet,
    index: usize,
}

impl FigureStamp {
    pub fn new(figures: FigureSet, index: usize) -> Self {
        FigureStamp { figures, index }
    }

    /// The figure as it would be drawn now.
    pub fn figure(&self) -> Option<Figure> {
        self.figures.get(self.index)
    }

    pub fn figures(&self) -> &FigureSet {
        &self.figures
    }
}

/// Translates the figures of a [`FigureSet`].
#[derive(Debug, Clone)]
pub struct Translate {
    figures: FigureSet,
    limit: Option<usize>,
    dx: i32,
    dy: i32,
}

impl Translate {
    /// Translates every figure present in `figures` when the operation runs.
    pub fn live(figures: FigureSet, dx: i32, dy: i32) -> Self {
        Translate {
            figures,
            limit: None,
            dx,
            dy,
        }
    }

    /// Translates only the figures present in `figures` right now.
    pub fn snapshot(figures: FigureSet, dx: i32, dy: i32) -> Self {
        let limit = Some(figures.len());
        Translate {
            figures,
            limit,
            dx,
            dy,
        }
    }

    /// Caps the operation to the first `count` figures. Figures appended to
    /// the set afterwards are never translated by it.
    pub fn bounded(mut self, count: usize) -> Self {
        self.limit = Some(self.limit.map_or(count, |l| l.min(count)));
        self
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }

    /// The figures this operation would translate if it ran now.
    pub fn targets(&self) -> Vec<Figure> {
        let mut figures = self.figures.snapshot();
        if let Some(limit) = self.limit {
            figures.truncate(limit);
        }
        figures
    }

    pub fn figures(&self) -> &FigureSet {
        &self.figures
    }
}

/// One executable drawing action.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Fill the whole texture with a solid color.
    Fill(Color),
    /// Fill the whole texture black.
    Reset,
    /// Fill a rectangle black.
    BgRect(Rect),
    /// Stamp a figure.
    Figure(FigureStamp),
    /// Translate figures.
    Move(Translate),
    /// Deliver the texture as it stands.
    Update,
}

impl Operation {
    pub fn white_fill() -> Self {
        Operation::Fill(NamedColor::White.to_color())
    }

    pub fn green_fill() -> Self {
        Operation::Fill(NamedColor::Green.to_color())
    }

    /// Performs the operation against `texture`.
    ///
    /// Returns `true` when the texture is ready to be presented.
    pub fn apply(&self, texture: &mut Texture) -> bool {
        match self {
            Operation::Fill(color) => {
                texture.fill(texture.bounds(), *color);
                false
            }
            Operation::Reset => {
                texture.fill(texture.bounds(), NamedColor::Black.to_color());
                false
            }
            Operation::BgRect(rect) => {
                texture.fill(*rect, NamedColor::Black.to_color());
                false
            }
            Operation::Figure(stamp) => {
                if let Some(figure) = stamp.figure() {
                    figure.draw(texture);
                }
                false
            }
            Operation::Move(translate) => {
                translate
                    .figures
                    .translate(translate.limit, translate.dx, translate.dy);
                false
            }
            Operation::Update => true,
        }
    }
}
