// Author: Dustin Pilgrim
// License: MIT
//
// One-shot creation-time correction. Unlike the drag-time clamp (which slides
// a rect back inside and keeps its size), this trims the offending side only:
// the opposite edge stays where it was.

use crate::bounds::CanvasBounds;
use crate::rect::{Position, fit_under};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Fixed application order.
    pub const ORDER: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    pub fn is_violated(self, r: &Position, b: &CanvasBounds) -> bool {
        match self {
            Edge::Left => r.x < b.x.min,
            Edge::Right => r.right() > b.x.max,
            Edge::Top => r.y < b.y.min,
            Edge::Bottom => r.bottom() > b.y.max,
        }
    }

    /// Trim `r` so this edge lands on the bound.
    ///
    /// A rect lying entirely past the bound collapses to zero extent on it.
    /// Extents are rounded down where needed so the far edge never ends up
    /// past its limit in f64.
    pub fn correct(self, mut r: Position, b: &CanvasBounds) -> Position {
        match self {
            Edge::Left => {
                let right = r.right();
                r.x = b.x.min;
                r.w = extent(b.x.min, right);
            }
            Edge::Right => {
                if r.x > b.x.max {
                    r.x = b.x.max;
                }
                r.w = extent(r.x, b.x.max);
            }
            Edge::Top => {
                let bottom = r.bottom();
                r.y = b.y.min;
                r.h = extent(b.y.min, bottom);
            }
            Edge::Bottom => {
                if r.y > b.y.max {
                    r.y = b.y.max;
                }
                r.h = extent(r.y, b.y.max);
            }
        }
        r
    }
}

/// Largest extent from `start` whose far edge stays at or before `end`.
fn extent(start: f64, end: f64) -> f64 {
    if end <= start {
        return 0.0;
    }
    fit_under(end - start, start, end).max(0.0)
}

/// Violation flags, evaluated once against the original position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeViolations {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl EdgeViolations {
    pub fn detect(r: &Position, b: &CanvasBounds) -> Self {
        Self {
            left: Edge::Left.is_violated(r, b),
            right: Edge::Right.is_violated(r, b),
            top: Edge::Top.is_violated(r, b),
            bottom: Edge::Bottom.is_violated(r, b),
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    pub fn has(&self, edge: Edge) -> bool {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    /// Violated edges in application order.
    pub fn edges(self) -> impl Iterator<Item = Edge> {
        Edge::ORDER.into_iter().filter(move |e| self.has(*e))
    }
}

/// Pure form of the correction: flags up front, then each edge applied to
/// the result of the previous one.
pub fn correct_to_bounds(r: Position, b: &CanvasBounds) -> Position {
    EdgeViolations::detect(&r, b)
        .edges()
        .fold(r, |acc, edge| edge.correct(acc, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Limits;

    fn bounds(x0: f64, x1: f64, y0: f64, y1: f64) -> CanvasBounds {
        CanvasBounds::new(Limits::new(x0, x1), Limits::new(y0, y1))
    }

    #[test]
    fn inside_rect_is_untouched() {
        let b = bounds(0.0, 200.0, 0.0, 100.0);
        let r = Position::new(10.0, 10.0, 30.0, 20.0);
        assert!(!EdgeViolations::detect(&r, &b).any());
        assert_eq!(correct_to_bounds(r, &b), r);
    }

    #[test]
    fn left_violation_keeps_right_edge() {
        let b = bounds(0.0, 100.0, 0.0, 100.0);
        let r = correct_to_bounds(Position::new(-5.0, 10.0, 20.0, 10.0), &b);
        assert_eq!(r, Position::new(0.0, 10.0, 15.0, 10.0));
        assert_eq!(r.right(), 15.0);
    }

    #[test]
    fn right_violation_trims_width() {
        let b = bounds(0.0, 200.0, 0.0, 100.0);
        let r = correct_to_bounds(Position::new(190.0, 10.0, 30.0, 20.0), &b);
        assert_eq!(r, Position::new(190.0, 10.0, 10.0, 20.0));
    }

    #[test]
    fn top_and_bottom_are_symmetric() {
        let b = bounds(0.0, 100.0, 0.0, 100.0);
        let top = correct_to_bounds(Position::new(10.0, -8.0, 10.0, 20.0), &b);
        assert_eq!(top, Position::new(10.0, 0.0, 10.0, 12.0));
        let bottom = correct_to_bounds(Position::new(10.0, 90.0, 10.0, 20.0), &b);
        assert_eq!(bottom, Position::new(10.0, 90.0, 10.0, 10.0));
    }

    #[test]
    fn wider_than_canvas_on_both_sides() {
        let b = bounds(0.0, 200.0, 0.0, 100.0);
        let v = EdgeViolations::detect(&Position::new(-10.0, 10.0, 300.0, 20.0), &b);
        assert_eq!(v.edges().collect::<Vec<_>>(), vec![Edge::Left, Edge::Right]);
        let r = correct_to_bounds(Position::new(-10.0, 10.0, 300.0, 20.0), &b);
        assert_eq!(r, Position::new(0.0, 10.0, 200.0, 20.0));
    }

    #[test]
    fn fully_outside_collapses_onto_bound() {
        let b = bounds(0.0, 200.0, 0.0, 100.0);
        let r = correct_to_bounds(Position::new(250.0, 120.0, 30.0, 20.0), &b);
        assert_eq!(r, Position::new(200.0, 100.0, 0.0, 0.0));
        let r = correct_to_bounds(Position::new(-50.0, -40.0, 10.0, 10.0), &b);
        assert_eq!(r, Position::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn corrected_rect_is_always_contained() {
        let b = bounds(-20.0, 80.0, 5.0, 60.0);
        let steps = [-60.0, -20.0, -3.5, 0.0, 12.0, 55.0, 79.0, 130.0];
        let sizes = [0.0, 1.0, 25.0, 99.0, 250.0];
        for &x in &steps {
            for &y in &steps {
                for &w in &sizes {
                    for &h in &sizes {
                        let r = correct_to_bounds(Position::new(x, y, w, h), &b);
                        assert!(b.contains_rect(&r), "{x},{y},{w},{h} -> {r:?}");
                        assert!(r.w >= 0.0 && r.h >= 0.0);
                    }
                }
            }
        }
    }

    // xorshift64*, so runs are reproducible without a rand dependency.
    struct Rng(u64);

    impl Rng {
        fn next(&mut self) -> f64 {
            self.0 ^= self.0 >> 12;
            self.0 ^= self.0 << 25;
            self.0 ^= self.0 >> 27;
            let bits = self.0.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 11;
            bits as f64 / (1u64 << 53) as f64
        }

        fn range(&mut self, lo: f64, hi: f64) -> f64 {
            lo + (hi - lo) * self.next()
        }
    }

    #[test]
    fn rounding_never_pushes_an_edge_past_its_bound() {
        let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
        for _ in 0..100_000 {
            let (x0, y0) = (rng.range(-300.0, 300.0), rng.range(-300.0, 300.0));
            let b = bounds(
                x0,
                x0 + rng.range(1e-3, 500.0),
                y0,
                y0 + rng.range(1e-3, 500.0),
            );
            let r = Position::new(
                rng.range(-600.0, 600.0),
                rng.range(-600.0, 600.0),
                rng.range(0.0, 900.0),
                rng.range(0.0, 900.0),
            );

            let fixed = correct_to_bounds(r, &b);
            assert!(b.contains_rect(&fixed), "{r:?} in {b:?} -> {fixed:?}");
            assert!(fixed.w >= 0.0 && fixed.h >= 0.0);

            let fits = Position::new(r.x, r.y, r.w.min(b.x.span()) * 0.5, r.h.min(b.y.span()) * 0.5);
            let moved = b.clamp_move(fits);
            assert!(b.contains_rect(&moved), "{fits:?} in {b:?} -> {moved:?}");
        }
    }

    #[test]
    fn overflow_on_both_vertical_sides_stays_inside() {
        let b = bounds(0.0, 10.0, -164.869_6, 186.880_641_925_777_35);
        let r = correct_to_bounds(Position::new(1.0, -200.0, 2.0, 500.0), &b);
        assert_eq!(r.y, b.y.min);
        assert!(r.bottom() <= b.y.max);
        assert!(b.y.max - r.bottom() < 1e-12);
    }
}
