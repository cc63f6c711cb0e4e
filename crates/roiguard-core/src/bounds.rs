// Author: Dustin Pilgrim
// License: MIT

use crate::rect::{Limits, Point, Position, fit_under};

/// Snapshot of the visible extent of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub x: Limits,
    pub y: Limits,
}

impl CanvasBounds {
    pub const fn new(x: Limits, y: Limits) -> Self {
        Self { x, y }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y)
    }

    pub fn contains_rect(&self, r: &Position) -> bool {
        r.x >= self.x.min && r.right() <= self.x.max && r.y >= self.y.min && r.bottom() <= self.y.max
    }

    /// Drag-time clamp: keeps the size, slides the rect back inside.
    ///
    /// Rects larger than the bounds are pinned to the min edge.
    pub fn clamp_move(&self, mut r: Position) -> Position {
        if r.right() > self.x.max {
            r.x = fit_under(self.x.max - r.w, r.w, self.x.max);
        }
        if r.bottom() > self.y.max {
            r.y = fit_under(self.y.max - r.h, r.h, self.y.max);
        }
        if r.x < self.x.min {
            r.x = self.x.min;
        }
        if r.y < self.y.min {
            r.y = self.y.min;
        }
        r
    }
}

/// Anything that can report its current visible limits.
///
/// Implementations must return live values; callers never cache them.
pub trait BoundsProvider {
    fn x_limits(&self) -> Limits;
    fn y_limits(&self) -> Limits;

    fn bounds(&self) -> CanvasBounds {
        CanvasBounds::new(self.x_limits(), self.y_limits())
    }
}

impl BoundsProvider for CanvasBounds {
    fn x_limits(&self) -> Limits {
        self.x
    }

    fn y_limits(&self) -> Limits {
        self.y
    }
}
