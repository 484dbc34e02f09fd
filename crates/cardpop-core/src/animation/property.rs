#![forbid(unsafe_code)]

//! Interruptible property animation.
//!
//! A [`PropertyAnimator`] interpolates a value between two endpoints along
//! a [`TimingCurve`] over a fixed duration. It is ticked by the host's
//! display loop and can be stopped at any moment, freezing its current
//! interpolated value.
//!
//! # State machine
//!
//! ```text
//!   Inactive ──start()──▶ Active ──tick() reaches duration──▶ Inactive (finished at End)
//!                           │
//!                           └──stop()──▶ Stopped (frozen at current value)
//! ```
//!
//! # Invariants
//!
//! 1. `value()` equals `from` before the first tick and `to` exactly once
//!    the animator finishes naturally.
//! 2. A stopped animator never moves again, and `tick()` never reports a
//!    finish position for it (`finished()` reads `Current`).
//! 3. `tick()` reports [`StopPosition::End`] at most once.
//!
//! # Failure Modes
//!
//! - Zero duration: clamped to 1ns, so the first tick finishes.
//! - Ticking an inactive or stopped animator is a no-op.

use std::time::Duration;

use super::spring::Spring;
use super::{Animation, Fade};
use crate::geometry::{Rect, Translation};

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// A value that can be interpolated between two endpoints.
pub trait Interpolate: Copy {
    /// Interpolate from `self` toward `to` at progress `t`.
    ///
    /// `t` may leave [0, 1] when a spring overshoots; implementations should
    /// extrapolate, clamping only where the value has a hard range.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        crate::geometry::lerp(*self, *to, t)
    }
}

impl Interpolate for Rect {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

impl Interpolate for Translation {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// How progress advances over the animator's duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingCurve {
    /// Constant velocity.
    Linear,
    /// Damped spring with the given damping ratio, settling by the end of
    /// the duration.
    Spring { damping_ratio: f64 },
}

#[derive(Debug, Clone)]
enum Progress {
    Linear(Fade),
    Spring(Spring),
}

impl Progress {
    fn new(curve: TimingCurve, duration: Duration) -> Self {
        match curve {
            TimingCurve::Linear => Self::Linear(Fade::new(duration)),
            TimingCurve::Spring { damping_ratio } => {
                Self::Spring(Spring::with_damping_ratio(damping_ratio, duration))
            }
        }
    }

    fn tick(&mut self, dt: Duration) {
        match self {
            Self::Linear(fade) => fade.tick(dt),
            Self::Spring(spring) => spring.tick(dt),
        }
    }

    fn value(&self) -> f64 {
        match self {
            Self::Linear(fade) => fade.value(),
            Self::Spring(spring) => spring.value(),
        }
    }
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Lifecycle state of a [`PropertyAnimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimatorState {
    /// Not started, or finished naturally.
    #[default]
    Inactive,
    /// Running; advances on `tick()`.
    Active,
    /// Stopped mid-flight; frozen at its current value.
    Stopped,
}

/// Where an animator ended up when it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPosition {
    /// Reached the `to` endpoint.
    End,
    /// Stopped somewhere in between.
    Current,
}

/// Interpolates a value of type `T` between two endpoints over time.
#[derive(Debug, Clone)]
pub struct PropertyAnimator<T> {
    from: T,
    to: T,
    value: T,
    duration: Duration,
    elapsed: Duration,
    curve: TimingCurve,
    progress: Progress,
    state: AnimatorState,
    finished: Option<StopPosition>,
    allows_user_interaction: bool,
}

impl<T: Interpolate> PropertyAnimator<T> {
    /// Create an inactive animator from `from` to `to`.
    pub fn new(from: T, to: T, duration: Duration, curve: TimingCurve) -> Self {
        let duration = if duration.is_zero() {
            Duration::from_nanos(1)
        } else {
            duration
        };
        Self {
            from,
            to,
            value: from,
            duration,
            elapsed: Duration::ZERO,
            curve,
            progress: Progress::new(curve, duration),
            state: AnimatorState::Inactive,
            finished: None,
            allows_user_interaction: false,
        }
    }

    /// Whether the animated surface should keep receiving input while this
    /// animator runs (builder pattern).
    #[must_use]
    pub fn allows_user_interaction(mut self, allow: bool) -> Self {
        self.allows_user_interaction = allow;
        self
    }

    /// See [`allows_user_interaction`](Self::allows_user_interaction).
    pub fn is_user_interaction_enabled(&self) -> bool {
        self.allows_user_interaction
    }

    /// Begin running. Has no effect once stopped or finished.
    pub fn start(&mut self) {
        if self.state == AnimatorState::Inactive && self.finished.is_none() {
            self.state = AnimatorState::Active;
        }
    }

    /// Advance by `dt`. Returns the finish position on the tick that
    /// completes the animation.
    pub fn tick(&mut self, dt: Duration) -> Option<StopPosition> {
        if self.state != AnimatorState::Active {
            return None;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.value = self.to;
            self.state = AnimatorState::Inactive;
            self.finished = Some(StopPosition::End);
            return self.finished;
        }

        self.progress.tick(dt);
        self.value = self.from.interpolate(&self.to, self.progress.value());
        None
    }

    /// Stop immediately, freezing the current value. Returns that value.
    ///
    /// Completion work tied to a natural finish must not run for a stopped
    /// animator; `tick()` will never report [`StopPosition::End`] for it.
    pub fn stop(&mut self) -> T {
        if self.state == AnimatorState::Active {
            self.state = AnimatorState::Stopped;
            self.finished = Some(StopPosition::Current);
        }
        self.value
    }

    /// Re-aim a running animator at a new endpoint.
    ///
    /// The current value becomes the new start and the remaining time
    /// becomes the new duration, so the motion stays continuous.
    pub fn retarget(&mut self, to: T) {
        if self.state != AnimatorState::Active {
            return;
        }
        let remaining = self.duration.saturating_sub(self.elapsed);
        self.from = self.value;
        self.to = to;
        self.duration = if remaining.is_zero() {
            Duration::from_nanos(1)
        } else {
            remaining
        };
        self.elapsed = Duration::ZERO;
        self.progress = Progress::new(self.curve, self.duration);
    }

    /// Current interpolated value.
    pub fn value(&self) -> T {
        self.value
    }

    /// The end value the animator is heading toward.
    pub fn target(&self) -> T {
        self.to
    }

    /// Lifecycle state.
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Whether the animator is actively running.
    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Active
    }

    /// How the animator finished, if it has.
    pub fn finished(&self) -> Option<StopPosition> {
        self.finished
    }

    /// Elapsed time as a fraction of the duration, in [0, 1].
    pub fn fraction_complete(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Timing curve.
    pub fn curve(&self) -> TimingCurve {
        self.curve
    }
}
