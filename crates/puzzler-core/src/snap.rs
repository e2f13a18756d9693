#![forbid(unsafe_code)]

//! Neighbour detection and group merging on release.
//!
//! When a drag ends, every piece of the dragged unit is compared with its
//! four grid neighbours. A neighbour whose actual offset is within the
//! tolerance of its ideal offset links to the moved piece, and the owning
//! groups merge.
//!
//! # Invariants
//!
//! 1. [`SnapDetector::matches`] is symmetric.
//! 2. The tolerance test is inclusive on both axes.
//! 3. Neighbours are visited west, north, east, south, and moved pieces in
//!    the order they were passed in (snapshotted before any merge).
//! 4. After `check_links`, every linked pair satisfies the group offset law.

use crate::config::{CELL_SIZE, SNAP_DISTANCE};
use crate::group::{GroupSet, grid_offset};
use crate::piece::Side;
use crate::view::{GridShape, PieceId, PieceView};

/// Which of the four merge cases a link triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    /// Neither piece was grouped; a new group was seeded with the neighbour.
    NewGroup,
    /// The neighbour's group took in the ungrouped moved piece.
    JoinNeighbor,
    /// The moved piece's group took in the ungrouped neighbour.
    AbsorbNeighbor,
    /// The neighbour's group took in the moved piece's whole group.
    MergeGroups,
    /// Both pieces already shared a group.
    AlreadyLinked,
}

/// A single detected link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapLink {
    pub moved: PieceId,
    pub neighbor: PieceId,
    pub side: Side,
    pub kind: MergeKind,
}

/// Result of [`SnapDetector::check_links`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapOutcome {
    pub links: Vec<SnapLink>,
}

impl SnapOutcome {
    /// Whether any membership changed.
    pub fn merged(&self) -> bool {
        self.links.iter().any(|l| l.kind != MergeKind::AlreadyLinked)
    }
}

/// Adjacency checker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapDetector {
    pub cell_size: f64,
    pub tolerance: f64,
}

impl Default for SnapDetector {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            tolerance: SNAP_DISTANCE,
        }
    }
}

impl SnapDetector {
    #[must_use]
    pub const fn new(cell_size: f64, tolerance: f64) -> Self {
        Self {
            cell_size,
            tolerance,
        }
    }

    /// Whether `neighbor` sits within tolerance of where it belongs relative
    /// to `piece`.
    pub fn matches(&self, piece: &PieceView, neighbor: &PieceView) -> bool {
        let expected = grid_offset(piece.grid(), neighbor.grid(), self.cell_size);
        let actual = neighbor.position() - piece.position();
        (actual.x - expected.x).abs() <= self.tolerance
            && (actual.y - expected.y).abs() <= self.tolerance
    }

    /// Link every moved piece with its matching neighbours.
    pub fn check_links(
        &self,
        moved: &[PieceId],
        views: &mut [PieceView],
        shape: GridShape,
        groups: &mut GroupSet,
    ) -> SnapOutcome {
        let mut outcome = SnapOutcome::default();
        for &piece in moved {
            for side in Side::SNAP_ORDER {
                let Some(neighbor) = shape.id_at(views[piece.index()].grid().step(side)) else {
                    continue;
                };
                if !self.matches(&views[piece.index()], &views[neighbor.index()]) {
                    continue;
                }
                let kind = self.link(piece, neighbor, views, groups);
                tracing::debug!(
                    moved = %piece,
                    neighbor = %neighbor,
                    side = ?side,
                    kind = ?kind,
                    "snap link"
                );
                outcome.links.push(SnapLink {
                    moved: piece,
                    neighbor,
                    side,
                    kind,
                });
            }
        }
        debug_assert!(groups.is_consistent());
        outcome
    }

    fn link(
        &self,
        piece: PieceId,
        neighbor: PieceId,
        views: &mut [PieceView],
        groups: &mut GroupSet,
    ) -> MergeKind {
        match (groups.group_of(piece), groups.group_of(neighbor)) {
            (None, None) => {
                groups.create_pair(neighbor, piece, views, self.cell_size);
                MergeKind::NewGroup
            }
            (None, Some(theirs)) => {
                groups.absorb(theirs, piece, views);
                MergeKind::JoinNeighbor
            }
            (Some(ours), None) => {
                groups.absorb(ours, neighbor, views);
                MergeKind::AbsorbNeighbor
            }
            (Some(ours), Some(theirs)) if ours == theirs => MergeKind::AlreadyLinked,
            (Some(ours), Some(theirs)) => {
                groups.merge(ours, theirs, views);
                MergeKind::MergeGroups
            }
        }
    }
}
