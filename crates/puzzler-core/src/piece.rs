#![forbid(unsafe_code)]

//! Immutable puzzle pieces: grid identity plus connector shape.
//!
//! A [`Piece`] is produced once by a generator and never changes. The board
//! wraps each one in a [`PieceView`](crate::view::PieceView) that carries the
//! mutable runtime state.
//!
//! # Invariants
//!
//! 1. [`GridPos`] orders row-major: by `y`, then by `x`. Group origin
//!    selection depends on this being a total order.
//! 2. Facing connectors of adjacent pieces mirror each other (`Tab` faces
//!    `Blank`). The generator guarantees this; the board trusts it.

use std::cmp::Ordering;
use std::fmt;

/// Canonical slot of a piece in the uncut puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring slot in the given direction.
    #[inline]
    #[must_use]
    pub const fn step(self, side: Side) -> Self {
        let (dx, dy) = side.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Ord for GridPos {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for GridPos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Shape of one side of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectorKind {
    /// Puzzle boundary, straight edge.
    #[default]
    Edge,
    /// Protrusion.
    Tab,
    /// Recess.
    Blank,
}

impl ConnectorKind {
    /// The connector a neighbour must present on the touching side.
    #[inline]
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Edge => Self::Edge,
            Self::Tab => Self::Blank,
            Self::Blank => Self::Tab,
        }
    }

    /// Outward displacement sign used when tracing the silhouette.
    #[inline]
    pub(crate) const fn sign(self) -> f64 {
        match self {
            Self::Edge => 0.0,
            Self::Tab => 1.0,
            Self::Blank => -1.0,
        }
    }
}

/// One of the four sides of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    /// Order in which snapping visits neighbours.
    pub const SNAP_ORDER: [Side; 4] = [Side::West, Side::North, Side::East, Side::South];

    /// Grid delta `(dx, dy)` towards the neighbour on this side.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// A single puzzle piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub grid: GridPos,
    pub north: ConnectorKind,
    pub south: ConnectorKind,
    pub east: ConnectorKind,
    pub west: ConnectorKind,
}

impl Piece {
    #[must_use]
    pub const fn new(
        x: i32,
        y: i32,
        north: ConnectorKind,
        south: ConnectorKind,
        east: ConnectorKind,
        west: ConnectorKind,
    ) -> Self {
        Self {
            grid: GridPos::new(x, y),
            north,
            south,
            east,
            west,
        }
    }

    /// A piece with straight edges on every side.
    #[must_use]
    pub const fn plain(x: i32, y: i32) -> Self {
        Self::new(
            x,
            y,
            ConnectorKind::Edge,
            ConnectorKind::Edge,
            ConnectorKind::Edge,
            ConnectorKind::Edge,
        )
    }

    #[inline]
    pub const fn x(&self) -> i32 {
        self.grid.x
    }

    #[inline]
    pub const fn y(&self) -> i32 {
        self.grid.y
    }

    /// Connector on the given side.
    #[inline]
    pub const fn connector(&self, side: Side) -> ConnectorKind {
        match side {
            Side::North => self.north,
            Side::East => self.east,
            Side::South => self.south,
            Side::West => self.west,
        }
    }
}
