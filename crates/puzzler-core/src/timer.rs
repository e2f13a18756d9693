#![forbid(unsafe_code)]

//! Pausable play clock and end-of-game statistics.
//!
//! [`PlayTimer`] accumulates running time across pause/resume cycles. Like
//! every other time-dependent type in this crate it never reads the clock
//! itself; callers pass `now`.

use std::fmt;

use web_time::{Duration, Instant};

/// Elapsed play time that can be paused and resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayTimer {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl PlayTimer {
    /// A stopped timer at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accumulated: Duration::ZERO,
            running_since: None,
        }
    }

    /// Zero the timer and start it.
    pub fn start(&mut self, now: Instant) {
        self.accumulated = Duration::ZERO;
        self.running_since = Some(now);
    }

    /// Freeze the timer. No-op when already paused.
    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    /// Continue from the frozen value. No-op when running.
    pub fn resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Stop and zero.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Total running time up to `now`.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + now.saturating_duration_since(since),
            None => self.accumulated,
        }
    }
}

/// Summary shown when a puzzle is finished by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionStats {
    pub pieces: usize,
    pub moves: u32,
    pub elapsed: Duration,
    pub avg_moves_per_piece: f64,
}

impl CompletionStats {
    #[must_use]
    pub fn new(pieces: usize, moves: u32, elapsed: Duration) -> Self {
        let avg_moves_per_piece = if pieces == 0 {
            0.0
        } else {
            f64::from(moves) / pieces as f64
        };
        Self {
            pieces,
            moves,
            elapsed,
            avg_moves_per_piece,
        }
    }
}

impl fmt::Display for CompletionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed.as_secs();
        writeln!(f, "Pieces: {}", self.pieces)?;
        writeln!(f, "Moves: {}", self.moves)?;
        writeln!(
            f,
            "Time: {:02}:{:02}:{:02}",
            secs / 3600,
            (secs / 60) % 60,
            secs % 60
        )?;
        write!(f, "Avg. moves per piece: {:.2}", self.avg_moves_per_piece)
    }
}
