#![forbid(unsafe_code)]

//! Pointer dragging of pieces and groups.
//!
//! A drag moves a *unit*: the pressed piece's group, or the piece alone when
//! it is ungrouped. [`DragController`] starts sessions and turns pointer
//! motion into clamped, rigid moves of the unit. The board stores the live
//! [`DragSession`] in its state enum, so a drag and an animation can never
//! overlap.
//!
//! # Invariants
//!
//! 1. The unit never leaves the board: its reference rectangle (group bounds
//!    or piece cell) stays inside `[0, board_w] × [0, board_h]`.
//! 2. After a clamped move the anchor is shifted by exactly the applied
//!    displacement (in screen units), so the pointer keeps its grip on the
//!    same point of the unit.
//! 3. A session owns its [`PointerCapture`]; dropping the session releases
//!    the capture on every exit path.
//!
//! # Failure Modes
//!
//! - A unit larger than the board pins to the top-left corner on that axis.
//! - A zero or negative zoom is treated as 1.0.

use crate::geometry::{Point, Rect};
use crate::group::{GroupId, GroupSet};
use crate::view::{PieceId, PieceView};

// ---------------------------------------------------------------------------
// Capture
// ---------------------------------------------------------------------------

/// Scoped pointer-capture token. Released when dropped.
#[derive(Debug)]
pub struct PointerCapture {
    piece: PieceId,
}

impl PointerCapture {
    fn acquire(piece: PieceId) -> Self {
        tracing::debug!(piece = %piece, "pointer capture acquired");
        Self { piece }
    }

    /// The piece that took the capture.
    #[inline]
    pub fn piece(&self) -> PieceId {
        self.piece
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        tracing::debug!(piece = %self.piece, "pointer capture released");
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A drag in progress.
#[derive(Debug)]
pub struct DragSession {
    piece: PieceId,
    group: Option<GroupId>,
    unit: Vec<PieceId>,
    anchor: Point,
    capture: PointerCapture,
}

impl DragSession {
    /// The piece under the pointer when the drag began.
    #[inline]
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    #[inline]
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Every piece being dragged, snapshotted at pointer-down.
    #[inline]
    pub fn unit(&self) -> &[PieceId] {
        &self.unit
    }

    /// Last screen position the unit is pinned to.
    #[inline]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    #[inline]
    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drag state machine logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragController {
    cell: f64,
}

impl DragController {
    #[must_use]
    pub const fn new(cell: f64) -> Self {
        Self { cell }
    }

    /// Start dragging the unit containing `piece`, gripped at `screen`.
    pub fn begin(&self, piece: PieceId, groups: &GroupSet, screen: Point) -> DragSession {
        let group = groups.group_of(piece);
        let unit = groups.unit_of(piece);
        tracing::debug!(
            piece = %piece,
            group = ?group,
            unit = unit.len(),
            "drag started"
        );
        DragSession {
            piece,
            group,
            unit,
            anchor: screen,
            capture: PointerCapture::acquire(piece),
        }
    }

    /// Reference rectangle of the unit: group bounds or the piece cell.
    pub fn unit_rect(&self, session: &DragSession, views: &[PieceView], groups: &GroupSet) -> Rect {
        match session.group.and_then(|gid| groups.get(gid)) {
            Some(group) => group.bounds(),
            None => views[session.piece.index()].cell_rect(self.cell),
        }
    }

    /// Follow the pointer to `screen`. Returns the applied board-space
    /// displacement.
    pub fn drag_to(
        &self,
        session: &mut DragSession,
        screen: Point,
        zoom: f64,
        extent: Rect,
        views: &mut [PieceView],
        groups: &mut GroupSet,
    ) -> Point {
        let zoom = if zoom > 0.0 { zoom } else { 1.0 };
        let rect = self.unit_rect(session, views, groups);
        let origin = rect.origin();
        let candidate = origin + (screen - session.anchor) * (1.0 / zoom);

        let max_x = (extent.right() - rect.width).max(extent.x);
        let max_y = (extent.bottom() - rect.height).max(extent.y);
        let clamped = Point::new(
            candidate.x.clamp(extent.x, max_x),
            candidate.y.clamp(extent.y, max_y),
        );

        match session.group.and_then(|gid| groups.get_mut(gid)) {
            Some(group) => group.set_origin(clamped.x, clamped.y, views),
            None => views[session.piece.index()].set_position(clamped),
        }

        let applied = clamped - origin;
        session.anchor = session.anchor + applied * zoom;
        applied
    }
}
