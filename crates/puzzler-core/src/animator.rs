#![forbid(unsafe_code)]

//! Time-driven tween scheduler.
//!
//! An [`Animator`] runs a fixed set of tweens over a shared target for one
//! duration. The host owns the clock: it calls [`Animator::tick`] with the
//! current instant once per frame, and the animator writes interpolated
//! values into the target through each tween's `apply` closure.
//!
//! # Invariants
//!
//! 1. Progress is `elapsed / duration` clamped to `[0, 1]`.
//! 2. A tick that reaches progress 1.0 applies every tween at its end value,
//!    runs the frame callback, runs the completion callback, and returns
//!    [`AnimatorStep::Completed`]. This happens exactly once.
//! 3. Once completed the animator is detached from the clock: later ticks
//!    return [`AnimatorStep::Idle`] and touch nothing. It cannot restart.
//!
//! # Failure Modes
//!
//! - Durations shorter than [`MIN_DURATION`] (including zero) complete on
//!   the first tick with progress exactly 1.0. There is no division by zero.
//! - A clock that runs backwards saturates elapsed time at zero.

use std::fmt;

use web_time::{Duration, Instant};

use crate::easing::Easing;
use crate::geometry::Point;

/// Durations below this complete on the first tick.
pub const MIN_DURATION: Duration = Duration::from_micros(1);

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Values a tween can blend between.
pub trait Interpolate: Copy {
    /// Blend from `self` (at `t = 0`) towards `to` (at `t = 1`). `t` may
    /// leave `[0, 1]` for overshooting curves.
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn lerp(self, to: Self, t: f64) -> Self {
        if t == 1.0 {
            return to;
        }
        self + (to - self) * t
    }
}

impl Interpolate for Point {
    #[inline]
    fn lerp(self, to: Self, t: f64) -> Self {
        Point::new(self.x.lerp(to.x, t), self.y.lerp(to.y, t))
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

type TweenFn<T> = Box<dyn FnMut(&mut T, f64)>;
type FrameFn<T> = Box<dyn FnMut(&mut T, f64)>;
type CompleteFn<T> = Box<dyn FnOnce(&mut T)>;

/// Lifecycle of an [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// Built but not started.
    Pending,
    /// Attached to the clock since `start`.
    Running { start: Instant },
    /// Finished and detached.
    Completed,
}

/// What a single [`Animator::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorStep {
    /// Tweens were applied at this linear progress; more frames follow.
    Running(f64),
    /// The final frame was applied. Returned once per animator.
    Completed,
    /// Nothing happened (not started, or already completed).
    Idle,
}

/// Tween scheduler over a target `T`.
pub struct Animator<T> {
    duration: Duration,
    tweens: Vec<TweenFn<T>>,
    on_frame: Option<FrameFn<T>>,
    on_complete: Option<CompleteFn<T>>,
    state: AnimatorState,
}

impl<T> fmt::Debug for Animator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("duration", &self.duration)
            .field("tweens", &self.tweens.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl<T: 'static> Animator<T> {
    /// Empty animator for the given duration.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tweens: Vec::new(),
            on_frame: None,
            on_complete: None,
            state: AnimatorState::Pending,
        }
    }

    /// Add a tween (builder pattern).
    #[must_use]
    pub fn tween<V, F>(mut self, from: V, to: V, easing: Easing, apply: F) -> Self
    where
        V: Interpolate + 'static,
        F: FnMut(&mut T, V) + 'static,
    {
        self.add_tween(from, to, easing, apply);
        self
    }

    /// Add a tween in place.
    pub fn add_tween<V, F>(&mut self, from: V, to: V, easing: Easing, mut apply: F)
    where
        V: Interpolate + 'static,
        F: FnMut(&mut T, V) + 'static,
    {
        self.tweens.push(Box::new(move |target: &mut T, progress: f64| {
            apply(target, from.lerp(to, easing.apply(progress)));
        }));
    }

    /// Called after the tweens on every applied frame with the linear
    /// progress.
    #[must_use]
    pub fn on_frame(mut self, f: impl FnMut(&mut T, f64) + 'static) -> Self {
        self.on_frame = Some(Box::new(f));
        self
    }

    /// Called once, after the final frame.
    #[must_use]
    pub fn on_complete(mut self, f: impl FnOnce(&mut T) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

impl<T> Animator<T> {
    /// Attach to the clock. Ignored unless pending.
    pub fn start(&mut self, now: Instant) {
        if self.state == AnimatorState::Pending {
            self.state = AnimatorState::Running { start: now };
        }
    }

    /// Linear progress at `now`.
    pub fn progress(&self, now: Instant) -> f64 {
        match self.state {
            AnimatorState::Pending => 0.0,
            AnimatorState::Completed => 1.0,
            AnimatorState::Running { start } => {
                if self.duration < MIN_DURATION {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(start);
                (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
            }
        }
    }

    /// Advance to `now`, writing the interpolated frame into `target`.
    pub fn tick(&mut self, target: &mut T, now: Instant) -> AnimatorStep {
        if !matches!(self.state, AnimatorState::Running { .. }) {
            return AnimatorStep::Idle;
        }
        let progress = self.progress(now);
        for tween in &mut self.tweens {
            tween(target, progress);
        }
        if let Some(on_frame) = self.on_frame.as_mut() {
            on_frame(target, progress);
        }
        if progress < 1.0 {
            tracing::trace!(progress, "animator frame");
            return AnimatorStep::Running(progress);
        }

        self.state = AnimatorState::Completed;
        self.tweens.clear();
        self.on_frame = None;
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(target);
        }
        AnimatorStep::Completed
    }

    #[inline]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimatorState::Running { .. })
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == AnimatorState::Completed
    }

    /// Number of tweens still attached.
    #[inline]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
