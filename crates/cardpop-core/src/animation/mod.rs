#![forbid(unsafe_code)]

//! Tick-driven animation primitives.
//!
//! Animations produce a progress value and advance only when the host calls
//! [`Animation::tick`] from its display loop; there are no timers or threads.
//! A suspended animation is simply one that hasn't been ticked yet.
//!
//! - [`Fade`]: linear progress over a fixed duration, with optional easing.
//! - [`spring::Spring`]: damped-spring progress curve.
//! - [`property::PropertyAnimator`]: interpolates a [`property::Interpolate`]
//!   value between two endpoints along a [`property::TimingCurve`], and can
//!   be stopped mid-flight at its current value.
//! - [`slot::AnimatorSlot`]: holds at most one running animator per role.

use std::time::Duration;

pub mod property;
pub mod slot;
pub mod spring;

pub use property::{Interpolate, PropertyAnimator, StopPosition, TimingCurve};
pub use slot::{AnimatorSlot, Interruptible};
pub use spring::Spring;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value. Usually in [0.0, 1.0]; springs may overshoot.
    fn value(&self) -> f64;

    /// Reset the animation to its initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Linear progression from 0.0 to 1.0 over a duration, with configurable easing.
///
/// Tracks elapsed time as [`Duration`] internally for precise accumulation.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with the given duration and linear easing.
    ///
    /// A zero duration is clamped to 1ns so progress stays well-defined.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    pub fn raw_progress(&self) -> f64 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        t.clamp(0.0, 1.0)
    }

    /// Total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_clamps() {
        assert_eq!(linear(-1.0), 0.0);
        assert_eq!(linear(0.25), 0.25);
        assert_eq!(linear(2.0), 1.0);
    }

    #[test]
    fn fade_progresses_linearly() {
        let mut fade = Fade::new(Duration::from_millis(100));
        fade.tick(Duration::from_millis(25));
        assert!((fade.value() - 0.25).abs() < 1e-9);
        assert!(!fade.is_complete());
        fade.tick(Duration::from_millis(100));
        assert_eq!(fade.value(), 1.0);
        assert!(fade.is_complete());
    }

    #[test]
    fn fade_zero_duration_completes_on_first_tick() {
        let mut fade = Fade::new(Duration::ZERO);
        assert!(!fade.is_complete());
        fade.tick(Duration::from_nanos(1));
        assert!(fade.is_complete());
    }

    #[test]
    fn fade_reset() {
        let mut fade = Fade::new(Duration::from_millis(10));
        fade.tick(Duration::from_millis(10));
        fade.reset();
        assert_eq!(fade.value(), 0.0);
    }

    #[test]
    fn custom_easing_applies() {
        fn square(t: f64) -> f64 {
            t * t
        }
        let mut fade = Fade::new(Duration::from_millis(100)).easing(square);
        fade.tick(Duration::from_millis(50));
        assert!((fade.value() - 0.25).abs() < 1e-9);
    }
}
