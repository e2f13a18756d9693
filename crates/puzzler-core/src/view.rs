#![forbid(unsafe_code)]

//! Runtime state for a piece on the board.
//!
//! A [`PieceView`] pairs an immutable [`Piece`] with the state that changes
//! during play: its position in board space and its place in the draw order.
//! Positions are only written by the board and the group operations, so
//! hosts read them through accessors.

use std::fmt;

use crate::geometry::{Point, Rect};
use crate::piece::{GridPos, Piece};

/// Dense index of a piece on a bound board.
///
/// Ids are assigned row-major at bind time: `id = row * cols + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(usize);

impl PieceId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Dimensions of a bound puzzle; maps grid slots to dense ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridShape {
    pub cols: u32,
    pub rows: u32,
}

impl GridShape {
    #[inline]
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Number of slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Id of the piece at `pos`, or `None` outside the grid.
    pub fn id_at(&self, pos: GridPos) -> Option<PieceId> {
        let col = u32::try_from(pos.x).ok().filter(|&c| c < self.cols)?;
        let row = u32::try_from(pos.y).ok().filter(|&r| r < self.rows)?;
        Some(PieceId::new(row as usize * self.cols as usize + col as usize))
    }
}

/// A piece plus its mutable board state.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceView {
    id: PieceId,
    piece: Piece,
    position: Point,
    z_order: usize,
}

impl PieceView {
    pub fn new(id: PieceId, piece: Piece, position: Point, z_order: usize) -> Self {
        Self {
            id,
            piece,
            position,
            z_order,
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    #[inline]
    pub fn grid(&self) -> GridPos {
        self.piece.grid
    }

    /// Top-left corner of the piece's grid cell in board space.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Draw order; higher values are drawn later (on top).
    #[inline]
    pub fn z_order(&self) -> usize {
        self.z_order
    }

    /// Cell rectangle (`cell × cell` at the position). Tabs stick out of it.
    #[inline]
    pub fn cell_rect(&self, cell: f64) -> Rect {
        Rect::cell(self.position, cell)
    }

    #[inline]
    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    #[inline]
    pub(crate) fn translate(&mut self, delta: Point) {
        self.position = self.position + delta;
    }

    #[inline]
    pub(crate) fn set_z_order(&mut self, z_order: usize) {
        self.z_order = z_order;
    }
}
