#![forbid(unsafe_code)]

//! Random jigsaw cuts.
//!
//! [`generate`] produces a `cols × rows` grid of pieces in row-major order.
//! East and south connectors are drawn at random; north and west mirror the
//! neighbour already generated above and to the left, so facing sides
//! always interlock. Sides on the puzzle border are flat.

use rand::Rng;

use crate::piece::{ConnectorKind, Piece};

fn random_connector<R: Rng + ?Sized>(rng: &mut R) -> ConnectorKind {
    if rng.random_bool(0.5) {
        ConnectorKind::Tab
    } else {
        ConnectorKind::Blank
    }
}

/// Build a complete `cols × rows` puzzle.
///
/// Pieces are returned row-major, which is also the id order a
/// [`Board`](crate::board::Board) assigns on bind.
pub fn generate<R: Rng + ?Sized>(cols: u32, rows: u32, rng: &mut R) -> Vec<Piece> {
    let cols_i = i32::try_from(cols).unwrap_or(i32::MAX);
    let rows_i = i32::try_from(rows).unwrap_or(i32::MAX);
    let width = cols as usize;
    let mut pieces: Vec<Piece> = Vec::with_capacity(width * rows as usize);

    for y in 0..rows_i {
        for x in 0..cols_i {
            let east = if x + 1 < cols_i {
                random_connector(rng)
            } else {
                ConnectorKind::Edge
            };
            let south = if y + 1 < rows_i {
                random_connector(rng)
            } else {
                ConnectorKind::Edge
            };
            let north = if y > 0 {
                pieces[pieces.len() - width].south.mirrored()
            } else {
                ConnectorKind::Edge
            };
            let west = if x > 0 {
                pieces[pieces.len() - 1].east.mirrored()
            } else {
                ConnectorKind::Edge
            };
            pieces.push(Piece::new(x, y, north, south, east, west));
        }
    }
    tracing::debug!(cols, rows, pieces = pieces.len(), "generated puzzle");
    pieces
}
