// Author: Dustin Pilgrim
// License: MIT

use crate::error::RoiError;

/// Axis-aligned rectangle in canvas data units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Like `new`, but rejects negative or non-finite extents.
    pub fn checked(x: f64, y: f64, w: f64, h: f64) -> Result<Self, RoiError> {
        let ok = [x, y, w, h].iter().all(|v| v.is_finite()) && w >= 0.0 && h >= 0.0;
        if !ok {
            return Err(RoiError::InvalidGeometry { w, h });
        }
        Ok(Self { x, y, w, h })
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn top_right(&self) -> Point {
        Point {
            x: self.right(),
            y: self.y,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x <= self.right() && p.y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Lowers `v` until `v + other <= limit` holds after rounding.
///
/// `other <= limit` must already hold, otherwise `v` goes negative.
pub(crate) fn fit_under(mut v: f64, other: f64, limit: f64) -> f64 {
    loop {
        let over = v + other - limit;
        if over <= 0.0 {
            return v;
        }
        v = (v - over).min(v.next_down());
    }
}

/// Closed interval `[min, max]` along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
