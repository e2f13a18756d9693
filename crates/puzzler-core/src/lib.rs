#![forbid(unsafe_code)]

//! Core: board state, snapping and scripted transitions for jigsaw puzzles.
//!
//! # Role
//! `puzzler-core` is the headless engine behind an interactive jigsaw. It
//! owns piece positions and draw order, links neighbouring pieces into
//! rigid groups when they are dropped close enough, detects the solved
//! state, and drives the animated scatter and auto-solve transitions. It
//! never renders and never reads the clock or the pointer by itself.
//!
//! # Primary responsibilities
//! - **Board**: binds a grid of [`Piece`]s and owns the explicit
//!   `Idle / Dragging / Animating` state.
//! - **Groups**: rigid clusters with an index-based owner map.
//! - **Snapping**: 4-neighbour tolerance checks and the four merge cases.
//! - **Animator**: host-clocked tweens with 31 easing curves.
//! - **Generator / outline**: random cuts and exact silhouette hit tests.
//!
//! # How it fits in a host
//! The host feeds pointer events (screen space) and a frame clock
//! (`tick(now)`), draws [`Board::pieces`] in order, and reacts to the
//! returned [`PuzzleEvent`]s.
//!
//! ```
//! use puzzler_core::{Board, BoardConfig, generate};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut board = Board::new(BoardConfig::default().with_seed(7));
//! board.bind(generate(4, 3, &mut rng)).expect("complete grid");
//! assert_eq!(board.pieces().count(), 12);
//! assert!(!board.is_solved());
//! ```

pub mod animator;
pub mod board;
pub mod config;
pub mod drag;
pub mod easing;
pub mod error;
pub mod event;
pub mod generator;
pub mod geometry;
pub mod group;
pub mod outline;
pub mod piece;
pub mod snap;
pub mod solution;
pub mod timer;
pub mod view;

pub use animator::{Animator, AnimatorState, AnimatorStep, Interpolate, MIN_DURATION};
pub use board::{Board, BoardPhase, BoardState, Transition, TransitionKind};
pub use config::{BoardConfig, CELL_SIZE, SNAP_DISTANCE};
pub use drag::{DragController, DragSession, PointerCapture};
pub use easing::{Easing, UnknownEasing};
pub use error::{BindError, BoardError};
pub use event::{PointerEvent, PuzzleEvent, PuzzleSink};
pub use generator::generate;
pub use geometry::{Point, Rect};
pub use group::{Group, GroupId, GroupSet};
pub use outline::Outline;
pub use piece::{ConnectorKind, GridPos, Piece, Side};
pub use snap::{MergeKind, SnapDetector, SnapLink, SnapOutcome};
pub use solution::SolutionChecker;
pub use timer::{CompletionStats, PlayTimer};
pub use view::{GridShape, PieceId, PieceView};
