#![forbid(unsafe_code)]

//! Error types for binding and board commands.

use std::fmt;

use crate::board::BoardPhase;
use crate::piece::GridPos;
use crate::view::PieceId;

/// Errors raised when a piece set is bound to a board.
///
/// The board only accepts a complete, duplicate-free rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// Two pieces claim the same slot.
    DuplicatePiece { pos: GridPos },
    /// A slot inside the grid extent has no piece.
    MissingPiece { pos: GridPos },
    /// A piece sits at a negative column or row.
    NegativeCoordinate { pos: GridPos },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePiece { pos } => write!(f, "duplicate piece at grid slot {pos}"),
            Self::MissingPiece { pos } => write!(f, "no piece for grid slot {pos}"),
            Self::NegativeCoordinate { pos } => {
                write!(f, "piece at {pos} has a negative grid coordinate")
            }
        }
    }
}

impl std::error::Error for BindError {}

/// Errors raised by id-taking board commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The id does not name a piece on the bound puzzle.
    UnknownPiece(PieceId),
    /// The board is dragging or animating and cannot take the command.
    Busy(BoardPhase),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPiece(id) => write!(f, "piece {} is not on the board", id.index()),
            Self::Busy(phase) => write!(f, "board is busy ({phase:?})"),
        }
    }
}

impl std::error::Error for BoardError {}
