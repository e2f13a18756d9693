#![forbid(unsafe_code)]

//! Geometric primitives in board space.
//!
//! Board space is the zoom-independent coordinate system all game-state math
//! uses. Screen coordinates divided by the zoom factor give board
//! coordinates.

use std::ops::{Add, Mul, Sub};

/// A point (or offset) in board space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale both components by `factor`.
    #[inline]
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f64) -> Point {
        self.scale(rhs)
    }
}

/// An axis-aligned rectangle in board space.
///
/// `Rect::EMPTY` is the identity for [`Rect::union`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Empty rectangle; unions ignore it.
    pub const EMPTY: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square cell of side `size` with its top-left corner at `origin`.
    #[inline]
    pub const fn cell(origin: Point, size: f64) -> Self {
        Self::new(origin.x, origin.y, size, size)
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (half-open on the far edges).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Smallest rectangle containing both. Empty operands are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Same rectangle moved by `delta`.
    #[inline]
    #[must_use]
    pub fn translate(&self, delta: Point) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }
}
