#![forbid(unsafe_code)]

//! The puzzle session: bound pieces, groups, input and transitions.
//!
//! [`Board`] owns every piece view and group of one puzzle and routes
//! pointer input, snapping and the scripted transitions through a single
//! explicit state:
//!
//! ```text
//!            pointer_down (hit)           pointer_up / cancel
//!   Idle ─────────────────────▶ Dragging ─────────────────────▶ Idle
//!    │ ▲
//!    │ └──────────── tick reaches the end ──────────────┐
//!    └── randomize / solve ───────────────────▶ Animating ┘
//! ```
//!
//! # Invariants
//!
//! 1. Dragging and animating are mutually exclusive; the live
//!    [`DragSession`] or [`Transition`] is stored inside [`BoardState`].
//! 2. `order` is a permutation of all ids, bottom to top, and every view's
//!    `z_order` is its index in `order`.
//! 3. Snapping runs once per release, never during motion.
//! 4. The move counter only grows on releases that happen while unsolved.
//!
//! # Failure Modes
//!
//! - Pointer input while animating is dropped (logged at trace level).
//! - `randomize` / `solve` while animating are rejected with a warning.
//!   While dragging they cancel the drag first.
//! - Rebinding cancels any drag and abandons any transition.

use std::mem;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_time::{Duration, Instant};

use crate::animator::{Animator, AnimatorStep};
use crate::config::BoardConfig;
use crate::drag::{DragController, DragSession};
use crate::error::{BindError, BoardError};
use crate::event::{PointerEvent, PuzzleEvent};
use crate::geometry::{Point, Rect};
use crate::group::{Group, GroupSet};
use crate::outline::Outline;
use crate::piece::{GridPos, Piece};
use crate::snap::SnapDetector;
use crate::solution::SolutionChecker;
use crate::timer::CompletionStats;
use crate::view::{GridShape, PieceId, PieceView};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Which scripted transition is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Pieces fly to random positions.
    Scatter,
    /// Pieces fly to their solved positions.
    Solve,
}

/// A running scripted transition.
#[derive(Debug)]
pub struct Transition {
    kind: TransitionKind,
    was_solved: bool,
    animator: Animator<Vec<PieceView>>,
}

impl Transition {
    #[inline]
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    #[inline]
    pub fn animator(&self) -> &Animator<Vec<PieceView>> {
        &self.animator
    }
}

/// Board interaction state.
#[derive(Debug, Default)]
pub enum BoardState {
    #[default]
    Idle,
    Dragging(DragSession),
    Animating(Transition),
}

/// Payload-free view of [`BoardState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPhase {
    Idle,
    Dragging,
    Animating,
}

impl BoardState {
    pub fn phase(&self) -> BoardPhase {
        match self {
            Self::Idle => BoardPhase::Idle,
            Self::Dragging(_) => BoardPhase::Dragging,
            Self::Animating(_) => BoardPhase::Animating,
        }
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// An interactive jigsaw session.
#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    shape: GridShape,
    views: Vec<PieceView>,
    outlines: Vec<Outline>,
    /// Draw order, bottom to top.
    order: Vec<PieceId>,
    groups: GroupSet,
    snap: SnapDetector,
    drag: DragController,
    move_count: u32,
    solved: bool,
    zoom: f64,
    rng: SmallRng,
    state: BoardState,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Board {
    /// Empty board. Bind a puzzle with [`Board::bind`].
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self {
            shape: GridShape::default(),
            views: Vec::new(),
            outlines: Vec::new(),
            order: Vec::new(),
            groups: GroupSet::new(0),
            snap: SnapDetector::new(config.cell_size, config.snap_distance),
            drag: DragController::new(config.cell_size),
            move_count: 0,
            solved: false,
            zoom: config.clamp_zoom(config.initial_zoom),
            rng,
            state: BoardState::Idle,
            config,
        }
    }

    /// Replace the puzzle with `pieces` and scatter them.
    ///
    /// The pieces must form a complete `cols × rows` grid starting at
    /// `(0, 0)`, in any order. On error the board is left empty.
    pub fn bind(&mut self, pieces: Vec<Piece>) -> Result<(), BindError> {
        self.unbind();
        let (shape, slots) = Self::layout(pieces)?;
        let cell = self.config.cell_size;

        let mut views = Vec::with_capacity(slots.len());
        for (i, piece) in slots.into_iter().enumerate() {
            let position = self.random_position_for(shape);
            views.push(PieceView::new(PieceId::new(i), piece, position, i));
        }
        self.views = views;
        self.outlines = self
            .views
            .iter()
            .map(|v| Outline::for_piece(v.piece(), cell))
            .collect();
        self.order = (0..self.views.len()).map(PieceId::new).collect();
        self.groups = GroupSet::new(self.views.len());
        self.shape = shape;

        tracing::info!(
            cols = shape.cols,
            rows = shape.rows,
            pieces = self.views.len(),
            "puzzle bound"
        );
        Ok(())
    }

    fn unbind(&mut self) {
        match mem::take(&mut self.state) {
            BoardState::Dragging(session) => {
                tracing::debug!(piece = %session.piece(), "drag cancelled by rebind");
            }
            BoardState::Animating(transition) => {
                tracing::debug!(kind = ?transition.kind(), "transition abandoned by rebind");
            }
            BoardState::Idle => {}
        }
        self.shape = GridShape::default();
        self.views.clear();
        self.outlines.clear();
        self.order.clear();
        self.groups = GroupSet::new(0);
        self.move_count = 0;
        self.solved = false;
    }

    /// Validate and sort pieces into row-major slots.
    ///
    /// Nothing is allocated from the coordinates; a far-out piece is
    /// reported as the first empty slot.
    fn layout(mut pieces: Vec<Piece>) -> Result<(GridShape, Vec<Piece>), BindError> {
        if let Some(bad) = pieces.iter().find(|p| p.x() < 0 || p.y() < 0) {
            return Err(BindError::NegativeCoordinate { pos: bad.grid });
        }
        pieces.sort_by_key(|p| p.grid);
        if let Some(pair) = pieces.windows(2).find(|w| w[0].grid == w[1].grid) {
            return Err(BindError::DuplicatePiece { pos: pair[1].grid });
        }

        let cols = pieces.iter().map(|p| i64::from(p.x()) + 1).max().unwrap_or(0);
        let rows = pieces.iter().map(|p| i64::from(p.y()) + 1).max().unwrap_or(0);
        let slot = |k: i64| GridPos::new((k % cols) as i32, (k / cols) as i32);

        // Sorted and distinct: piece k must sit on slot k.
        for (k, piece) in (0i64..).zip(&pieces) {
            let expected = slot(k);
            if piece.grid != expected {
                return Err(BindError::MissingPiece { pos: expected });
            }
        }
        let count = pieces.len() as i64;
        if cols * rows != count {
            return Err(BindError::MissingPiece { pos: slot(count) });
        }
        Ok((GridShape::new(cols as u32, rows as u32), pieces))
    }

    fn extent_for(&self, shape: GridShape) -> Rect {
        if shape.is_empty() {
            return Rect::EMPTY;
        }
        let margin = f64::from(self.config.margin_cells);
        let cell = self.config.cell_size;
        Rect::new(
            0.0,
            0.0,
            (f64::from(shape.cols) + margin) * cell,
            (f64::from(shape.rows) + margin) * cell,
        )
    }

    /// Uniform position with the whole cell on the board.
    fn random_position_for(&mut self, shape: GridShape) -> Point {
        let extent = self.extent_for(shape);
        let cell = self.config.cell_size;
        let max_x = (extent.width - cell).max(0.0);
        let max_y = (extent.height - cell).max(0.0);
        Point::new(
            self.rng.random::<f64>() * max_x,
            self.rng.random::<f64>() * max_y,
        )
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Piece views in draw order, bottom to top.
    pub fn pieces(&self) -> impl Iterator<Item = &PieceView> + '_ {
        self.order.iter().map(|id| &self.views[id.index()])
    }

    /// Piece views indexed by id.
    #[inline]
    pub fn views(&self) -> &[PieceView] {
        &self.views
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&PieceView> {
        self.views.get(id.index())
    }

    /// Id of the piece at a grid slot.
    #[inline]
    pub fn piece_at(&self, grid: GridPos) -> Option<PieceId> {
        self.shape.id_at(grid)
    }

    #[inline]
    pub fn outline(&self, id: PieceId) -> Option<&Outline> {
        self.outlines.get(id.index())
    }

    #[inline]
    pub fn groups(&self) -> &GroupSet {
        &self.groups
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> BoardPhase {
        self.state.phase()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, BoardState::Animating(_))
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, BoardState::Dragging(_))
    }

    /// Whether a drag currently holds the pointer capture.
    #[inline]
    pub fn has_pointer_capture(&self) -> bool {
        self.is_dragging()
    }

    /// Board rectangle in board space: the grid plus the scatter margin.
    #[inline]
    pub fn extent(&self) -> Rect {
        self.extent_for(self.shape)
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom factor, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.zoom = self.config.clamp_zoom(zoom);
        self.zoom
    }

    /// Convert a screen point to board space.
    #[inline]
    pub fn to_board(&self, screen: Point) -> Point {
        screen * (1.0 / self.zoom)
    }

    /// Topmost piece whose silhouette contains the screen point.
    pub fn hit_test(&self, screen: Point) -> Option<&PieceView> {
        let p = self.to_board(screen);
        self.order.iter().rev().find_map(|id| {
            let view = &self.views[id.index()];
            self.outlines[id.index()]
                .contains(p - view.position())
                .then_some(view)
        })
    }

    /// Summary for a finished game.
    pub fn completion_stats(&self, elapsed: Duration) -> CompletionStats {
        CompletionStats::new(self.views.len(), self.move_count, elapsed)
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Move a piece (with its whole group) so the piece lands on `point`.
    ///
    /// No clamping or snapping is applied.
    pub fn place_piece(&mut self, id: PieceId, point: Point) -> Result<(), BoardError> {
        let phase = self.phase();
        if phase != BoardPhase::Idle {
            tracing::warn!(piece = %id, phase = ?phase, "place_piece rejected");
            return Err(BoardError::Busy(phase));
        }
        let Some(view) = self.views.get(id.index()) else {
            return Err(BoardError::UnknownPiece(id));
        };
        let delta = point - view.position();
        match self.groups.group_of(id).and_then(|gid| self.groups.get_mut(gid)) {
            Some(group) => {
                let bounds = group.bounds();
                group.set_origin(bounds.x + delta.x, bounds.y + delta.y, &mut self.views);
            }
            None => self.views[id.index()].set_position(point),
        }
        Ok(())
    }

    /// Move every member of `unit` to the top, keeping their relative order.
    fn raise(&mut self, unit: &[PieceId]) {
        let (mut rest, lifted): (Vec<PieceId>, Vec<PieceId>) =
            self.order.iter().copied().partition(|id| !unit.contains(id));
        rest.extend(lifted);
        self.order = rest;
        for (z, id) in self.order.iter().enumerate() {
            self.views[id.index()].set_z_order(z);
        }
    }

    // -----------------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------------

    /// Route a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<PuzzleEvent> {
        match event {
            PointerEvent::Down(p) => {
                self.pointer_down(p);
                Vec::new()
            }
            PointerEvent::Move(p) => {
                self.pointer_move(p);
                Vec::new()
            }
            PointerEvent::Up(p) => self.pointer_up(p),
            PointerEvent::Cancel => {
                self.cancel_drag();
                Vec::new()
            }
        }
    }

    /// Press at `screen`. Returns whether a drag started.
    pub fn pointer_down(&mut self, screen: Point) -> bool {
        match self.state {
            BoardState::Animating(_) => {
                tracing::trace!(x = screen.x, y = screen.y, "pointer down ignored while animating");
                return false;
            }
            BoardState::Dragging(_) => return false,
            BoardState::Idle => {}
        }
        let Some(id) = self.hit_test(screen).map(PieceView::id) else {
            return false;
        };
        let session = self.drag.begin(id, &self.groups, screen);
        self.raise(session.unit());
        self.state = BoardState::Dragging(session);
        true
    }

    /// Pointer motion. Returns whether anything moved.
    pub fn pointer_move(&mut self, screen: Point) -> bool {
        let extent = self.extent();
        match &mut self.state {
            BoardState::Dragging(session) => {
                let applied = self.drag.drag_to(
                    session,
                    screen,
                    self.zoom,
                    extent,
                    &mut self.views,
                    &mut self.groups,
                );
                applied != Point::ORIGIN
            }
            BoardState::Animating(_) => {
                tracing::trace!(x = screen.x, y = screen.y, "pointer move ignored while animating");
                false
            }
            BoardState::Idle => false,
        }
    }

    /// Release at `screen`: snap, count the move and check for a win.
    pub fn pointer_up(&mut self, screen: Point) -> Vec<PuzzleEvent> {
        let session = match mem::take(&mut self.state) {
            BoardState::Dragging(session) => session,
            other => {
                if matches!(other, BoardState::Animating(_)) {
                    tracing::trace!(x = screen.x, y = screen.y, "pointer up ignored while animating");
                }
                self.state = other;
                return Vec::new();
            }
        };

        let outcome = self
            .snap
            .check_links(session.unit(), &mut self.views, self.shape, &mut self.groups);
        tracing::debug!(
            piece = %session.piece(),
            links = outcome.links.len(),
            "drag released"
        );
        drop(session);

        let mut events = Vec::new();
        if !self.solved {
            self.move_count += 1;
            events.push(PuzzleEvent::Moved {
                move_count: self.move_count,
            });
            if SolutionChecker::is_solved(&self.groups) {
                self.solved = true;
                tracing::info!(move_count = self.move_count, "puzzle completed");
                events.push(PuzzleEvent::Completed {
                    auto_solved: false,
                    move_count: self.move_count,
                });
            }
        }
        events
    }

    /// Abort a drag without snapping or counting a move.
    pub fn cancel_drag(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        if let BoardState::Dragging(session) = mem::take(&mut self.state) {
            tracing::debug!(piece = %session.piece(), "drag cancelled");
        }
        true
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn can_start_transition(&mut self, name: &str) -> bool {
        if self.is_animating() {
            tracing::warn!(command = name, "rejected while animating");
            return false;
        }
        if self.views.is_empty() {
            return false;
        }
        if self.cancel_drag() {
            tracing::debug!(command = name, "drag cancelled by transition");
        }
        true
    }

    /// Scatter every ungrouped piece to a random position.
    ///
    /// A solved puzzle is dissolved first: its groups, the solved flag and
    /// the move counter are reset before any piece moves. Completion is
    /// reported by
    /// [`Board::tick`] as [`PuzzleEvent::Randomized`].
    pub fn randomize(&mut self, now: Instant) -> Vec<PuzzleEvent> {
        if !self.can_start_transition("randomize") {
            return Vec::new();
        }
        let was_solved = self.solved;
        if was_solved {
            self.groups.clear();
            self.solved = false;
            self.move_count = 0;
        }

        let mut animator = Animator::new(self.config.animation_duration);
        let shape = self.shape;
        let easing = self.config.scatter_easing;
        for i in 0..self.views.len() {
            if self.groups.group_of(PieceId::new(i)).is_some() {
                continue;
            }
            let from = self.views[i].position();
            let to = self.random_position_for(shape);
            animator.add_tween(from, to, easing, move |views: &mut Vec<PieceView>, p: Point| {
                if let Some(view) = views.get_mut(i) {
                    view.set_position(p);
                }
            });
        }
        self.start_transition(TransitionKind::Scatter, was_solved, animator, now);
        Vec::new()
    }

    /// Fly every piece home. No-op when already solved.
    ///
    /// Completion is reported by [`Board::tick`] as
    /// [`PuzzleEvent::Completed`] with `auto_solved: true`.
    pub fn solve(&mut self, now: Instant) -> Vec<PuzzleEvent> {
        if self.solved || !self.can_start_transition("solve") {
            return Vec::new();
        }
        let cell = self.config.cell_size;
        let easing = self.config.solve_easing;
        let mut animator = Animator::new(self.config.animation_duration);
        for (i, view) in self.views.iter().enumerate() {
            let grid = view.grid();
            let home = Point::new(f64::from(grid.x) * cell, f64::from(grid.y) * cell);
            animator.add_tween(
                view.position(),
                home,
                easing,
                move |views: &mut Vec<PieceView>, p: Point| {
                    if let Some(view) = views.get_mut(i) {
                        view.set_position(p);
                    }
                },
            );
        }
        self.start_transition(TransitionKind::Solve, false, animator, now);
        Vec::new()
    }

    fn start_transition(
        &mut self,
        kind: TransitionKind,
        was_solved: bool,
        mut animator: Animator<Vec<PieceView>>,
        now: Instant,
    ) {
        animator.start(now);
        tracing::info!(
            kind = ?kind,
            tweens = animator.len(),
            duration_ms = animator.duration().as_millis() as u64,
            "transition started"
        );
        self.state = BoardState::Animating(Transition {
            kind,
            was_solved,
            animator,
        });
    }

    /// Advance a running transition to `now`.
    ///
    /// Call once per frame while [`Board::is_animating`].
    pub fn tick(&mut self, now: Instant) -> Vec<PuzzleEvent> {
        let BoardState::Animating(transition) = &mut self.state else {
            return Vec::new();
        };
        match transition.animator.tick(&mut self.views, now) {
            AnimatorStep::Completed => {}
            AnimatorStep::Running(_) | AnimatorStep::Idle => return Vec::new(),
        }
        let BoardState::Animating(transition) = mem::take(&mut self.state) else {
            return Vec::new();
        };
        self.finish(transition)
    }

    fn finish(&mut self, transition: Transition) -> Vec<PuzzleEvent> {
        match transition.kind {
            TransitionKind::Scatter => {
                tracing::info!(was_solved = transition.was_solved, "puzzle randomized");
                vec![PuzzleEvent::Randomized {
                    was_solved: transition.was_solved,
                }]
            }
            TransitionKind::Solve => {
                let all = Group::from_members(
                    (0..self.views.len()).map(PieceId::new),
                    &self.views,
                    self.config.cell_size,
                );
                self.groups.replace_with_single(all);
                self.solved = true;
                tracing::info!(move_count = self.move_count, "puzzle auto-solved");
                vec![PuzzleEvent::Completed {
                    auto_solved: true,
                    move_count: self.move_count,
                }]
            }
        }
    }
}
