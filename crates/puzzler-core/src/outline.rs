#![forbid(unsafe_code)]

//! Piece silhouettes for exact hit testing.
//!
//! Each side of a piece is traced with the same six-segment cubic Bezier
//! edge. The edge is defined on a 100-unit cell and flipped per side by the
//! connector sign: a tab bulges out of the cell, a blank cuts into it, and
//! a flat edge collapses to a straight line. The four edges are flattened
//! into a closed polygon in cell-local coordinates.
//!
//! # Invariants
//!
//! 1. The polygon starts and ends at the cell's top-left corner and passes
//!    through all four corners.
//! 2. Tabs extend at most [`TAB_DEPTH`] of the cell beyond the cell square.
//! 3. The cell centre is always inside the polygon.

use crate::geometry::{Point, Rect};
use crate::piece::{Piece, Side};

/// Reference cell size the edge curve is defined on.
const UNIT: f64 = 100.0;

/// How far a tab protrudes, as a fraction of the cell size.
pub const TAB_DEPTH: f64 = 0.2;

/// Line segments per cubic when flattening.
const STEPS_PER_SEGMENT: usize = 8;

/// Control and end points of the north edge, left to right, on a 100-unit
/// cell with a tab pointing towards negative y. Consecutive triples are
/// `(control 1, control 2, end)`; the edge starts at `(0, 0)`.
const EDGE: [(f64, f64); 18] = [
    (0.0, 0.0),
    (35.0, 15.0),
    (37.0, 5.0),
    (37.0, 5.0),
    (40.0, 0.0),
    (38.0, -5.0),
    (38.0, -5.0),
    (20.0, -20.0),
    (50.0, -20.0),
    (50.0, -20.0),
    (80.0, -20.0),
    (62.0, -5.0),
    (62.0, -5.0),
    (60.0, 0.0),
    (63.0, 5.0),
    (63.0, 5.0),
    (65.0, 15.0),
    (100.0, 0.0),
];

/// Cubic Bezier curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    /// Evaluate the curve at `t ∈ [0, 1]`.
    pub fn eval(&self, t: f64) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;
        self.p0 * mt3 + self.p1 * (3.0 * mt2 * t) + self.p2 * (3.0 * mt * t2) + self.p3 * t3
    }
}

/// Place an edge-curve point on the given side of the cell.
fn orient(side: Side, (u, v): (f64, f64), sign: f64) -> Point {
    match side {
        Side::North => Point::new(u, v * sign),
        Side::East => Point::new(UNIT - v * sign, u),
        Side::South => Point::new(UNIT - u, UNIT - v * sign),
        Side::West => Point::new(v * sign, UNIT - u),
    }
}

/// Closed silhouette polygon in cell-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    points: Vec<Point>,
    cell: f64,
}

impl Outline {
    /// Trace the silhouette of `piece` for a cell of side `cell`.
    pub fn for_piece(piece: &Piece, cell: f64) -> Self {
        let scale = cell / UNIT;
        let mut points = Vec::with_capacity(4 * 6 * STEPS_PER_SEGMENT + 1);
        points.push(Point::ORIGIN);

        for side in [Side::North, Side::East, Side::South, Side::West] {
            let sign = piece.connector(side).sign();
            let mut start = orient(side, (0.0, 0.0), sign);
            for seg in EDGE.chunks_exact(3) {
                let curve = CubicBezier {
                    p0: start,
                    p1: orient(side, seg[0], sign),
                    p2: orient(side, seg[1], sign),
                    p3: orient(side, seg[2], sign),
                };
                for step in 1..=STEPS_PER_SEGMENT {
                    let t = step as f64 / STEPS_PER_SEGMENT as f64;
                    points.push(curve.eval(t) * scale);
                }
                start = curve.p3;
            }
        }
        Self { points, cell }
    }

    /// Polygon vertices; the first and last coincide.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Box containing every possible tab, relative to the cell origin.
    pub fn reach(&self) -> Rect {
        let pad = self.cell * TAB_DEPTH;
        Rect::new(-pad, -pad, self.cell + 2.0 * pad, self.cell + 2.0 * pad)
    }

    /// Whether the cell-local point lies inside the silhouette.
    pub fn contains(&self, local: Point) -> bool {
        if !self.reach().contains(local) {
            return false;
        }
        poly_contains_point(&self.points, local)
    }
}

/// Even-odd ray casting.
fn poly_contains_point(poly: &[Point], p: Point) -> bool {
    let Some(mut j) = poly.len().checked_sub(1) else {
        return false;
    };
    let mut inside = false;
    for (i, pi) in poly.iter().enumerate() {
        let pj = poly[j];
        let crosses = (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y + 1e-12) + pi.x;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::ConnectorKind::{Blank, Edge, Tab};

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn outline_passes_through_corners() {
        let piece = Piece::new(1, 1, Tab, Blank, Tab, Blank);
        let outline = Outline::for_piece(&piece, 100.0);
        let pts = outline.points();
        let per_side = 6 * STEPS_PER_SEGMENT;
        assert!(approx(pts[0], Point::new(0.0, 0.0)));
        assert!(approx(pts[per_side], Point::new(100.0, 0.0)));
        assert!(approx(pts[2 * per_side], Point::new(100.0, 100.0)));
        assert!(approx(pts[3 * per_side], Point::new(0.0, 100.0)));
        assert!(approx(pts[4 * per_side], Point::new(0.0, 0.0)));
    }

    #[test]
    fn flat_piece_is_its_cell() {
        let outline = Outline::for_piece(&Piece::plain(0, 0), 100.0);
        assert!(outline.contains(Point::new(1.0, 1.0)));
        assert!(outline.contains(Point::new(99.0, 50.0)));
        assert!(!outline.contains(Point::new(-1.0, 50.0)));
        assert!(!outline.contains(Point::new(50.0, 101.0)));
    }

    #[test]
    fn tab_extends_and_blank_cuts() {
        // East tab, west blank.
        let piece = Piece::new(1, 1, Edge, Edge, Tab, Blank);
        let outline = Outline::for_piece(&piece, 100.0);
        assert!(outline.contains(Point::new(110.0, 50.0)));
        assert!(!outline.contains(Point::new(10.0, 50.0)));
        assert!(outline.contains(Point::new(50.0, 50.0)));
    }

    #[test]
    fn north_tab_points_up() {
        let piece = Piece::new(0, 1, Tab, Edge, Edge, Edge);
        let outline = Outline::for_piece(&piece, 100.0);
        assert!(outline.contains(Point::new(50.0, -10.0)));
    }

    #[test]
    fn scales_with_cell() {
        let piece = Piece::new(1, 1, Edge, Tab, Edge, Edge);
        let outline = Outline::for_piece(&piece, 50.0);
        assert!(outline.contains(Point::new(25.0, 55.0)));
        assert!(!outline.contains(Point::new(25.0, 62.0)));
    }

    #[test]
    fn bezier_endpoints() {
        let curve = CubicBezier {
            p0: Point::new(0.0, 0.0),
            p1: Point::new(1.0, 2.0),
            p2: Point::new(3.0, 2.0),
            p3: Point::new(4.0, 0.0),
        };
        assert_eq!(curve.eval(0.0), curve.p0);
        assert_eq!(curve.eval(1.0), curve.p3);
    }
}
