#![forbid(unsafe_code)]

//! Board notifications and pointer input.
//!
//! Every mutating [`Board`](crate::board::Board) call returns the
//! notifications it produced as a `Vec<PuzzleEvent>`. Hosts that prefer
//! callbacks implement [`PuzzleSink`] and forward each event with
//! [`PuzzleEvent::dispatch`].

use crate::geometry::Point;

/// Something the host may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleEvent {
    /// A scatter transition finished.
    Randomized { was_solved: bool },
    /// The puzzle became solved, by hand or by the auto-solve transition.
    Completed { auto_solved: bool, move_count: u32 },
    /// A drag was released on an unsolved puzzle.
    Moved { move_count: u32 },
}

impl PuzzleEvent {
    /// Forward to the matching sink method.
    pub fn dispatch(&self, sink: &mut dyn PuzzleSink) {
        match *self {
            Self::Randomized { was_solved } => sink.on_randomized(was_solved),
            Self::Completed {
                auto_solved,
                move_count,
            } => sink.on_completed(auto_solved, move_count),
            Self::Moved { move_count } => sink.on_move(move_count),
        }
    }
}

/// Callback-style receiver for [`PuzzleEvent`]s. Every method defaults to a
/// no-op.
pub trait PuzzleSink {
    fn on_randomized(&mut self, _was_solved: bool) {}

    fn on_completed(&mut self, _auto_solved: bool, _move_count: u32) {}

    fn on_move(&mut self, _move_count: u32) {}
}

/// Records events in arrival order.
impl PuzzleSink for Vec<PuzzleEvent> {
    fn on_randomized(&mut self, was_solved: bool) {
        self.push(PuzzleEvent::Randomized { was_solved });
    }

    fn on_completed(&mut self, auto_solved: bool, move_count: u32) {
        self.push(PuzzleEvent::Completed {
            auto_solved,
            move_count,
        });
    }

    fn on_move(&mut self, move_count: u32) {
        self.push(PuzzleEvent::Moved { move_count });
    }
}

/// Pointer input in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    /// The host lost the pointer (focus change, capture stolen).
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        moves: u32,
        completions: u32,
    }

    impl PuzzleSink for Counter {
        fn on_move(&mut self, _move_count: u32) {
            self.moves += 1;
        }

        fn on_completed(&mut self, _auto_solved: bool, _move_count: u32) {
            self.completions += 1;
        }
    }

    #[test]
    fn dispatch_reaches_overridden_methods_only() {
        let mut counter = Counter::default();
        for event in [
            PuzzleEvent::Moved { move_count: 1 },
            PuzzleEvent::Randomized { was_solved: true },
            PuzzleEvent::Completed {
                auto_solved: false,
                move_count: 2,
            },
        ] {
            event.dispatch(&mut counter);
        }
        assert_eq!(counter.moves, 1);
        assert_eq!(counter.completions, 1);
    }

    #[test]
    fn vec_sink_records_in_order() {
        let events = [
            PuzzleEvent::Moved { move_count: 3 },
            PuzzleEvent::Completed {
                auto_solved: true,
                move_count: 3,
            },
        ];
        let mut log: Vec<PuzzleEvent> = Vec::new();
        for event in &events {
            event.dispatch(&mut log);
        }
        assert_eq!(log, events);
    }
}
