#![forbid(unsafe_code)]

//! Spring timing curve for the card's present/dismiss motion.
//!
//! [`Spring`] is a normalized progress curve: it starts at 0 with zero
//! velocity and comes to rest at 1. The curve is the closed-form step
//! response of a damped harmonic oscillator, so the same elapsed time
//! always yields the same progress regardless of how ticks were sliced.
//!
//! For damping ratio ζ < 1 and natural frequency ω:
//!
//! ```text
//!   x(t) = 1 - e^(-ζωt) · (cos(ω_d t) + ζ/√(1-ζ²) · sin(ω_d t)),   ω_d = ω√(1-ζ²)
//! ```
//!
//! and for ζ = 1, `x(t) = 1 - e^(-ωt) · (1 + ωt)`.
//!
//! ω is picked so the decay envelope `e^(-ζωt)` falls to [`REST_EPSILON`]
//! at the settle duration. Progress overshoots 1 when ζ < 1.

use std::time::Duration;

use super::Animation;

/// Envelope magnitude at which the spring counts as settled.
pub const REST_EPSILON: f64 = 0.001;

/// Damping ratios at or above this are treated as critically damped.
const CRITICAL: f64 = 0.999;

/// Normalized damped-spring progress from 0 to 1.
///
/// ```ignore
/// use std::time::Duration;
/// use cardpop_core::animation::{Animation, Spring};
///
/// let mut spring = Spring::with_damping_ratio(0.7, Duration::from_millis(380));
/// spring.tick(Duration::from_millis(380));
/// assert!((spring.value() - 1.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    damping_ratio: f64,
    omega: f64,
    settle: Duration,
    elapsed: Duration,
}

impl Spring {
    /// A spring with damping ratio `ratio` that settles in `settle`.
    ///
    /// `ratio` is clamped to [0.01, 1]; a zero `settle` is treated as 1ms.
    #[must_use]
    pub fn with_damping_ratio(ratio: f64, settle: Duration) -> Self {
        let damping_ratio = if ratio.is_nan() {
            1.0
        } else {
            ratio.clamp(0.01, 1.0)
        };
        let settle = settle.max(Duration::from_millis(1));
        let omega = (1.0 / REST_EPSILON).ln() / (damping_ratio * settle.as_secs_f64());
        Self {
            damping_ratio,
            omega,
            settle,
            elapsed: Duration::ZERO,
        }
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    /// Natural angular frequency in radians per second.
    pub fn natural_frequency(&self) -> f64 {
        self.omega
    }

    pub fn settle_duration(&self) -> Duration {
        self.settle
    }

    /// Progress at `t` seconds after the start.
    pub fn progress_at(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let zeta = self.damping_ratio;
        let decay = (-zeta * self.omega * t).exp();
        if zeta >= CRITICAL {
            return 1.0 - decay * (1.0 + self.omega * t);
        }
        let root = (1.0 - zeta * zeta).sqrt();
        let damped = self.omega * root;
        1.0 - decay * ((damped * t).cos() + zeta / root * (damped * t).sin())
    }

    /// Largest progress the curve reaches, at the first peak.
    pub fn peak(&self) -> f64 {
        let zeta = self.damping_ratio;
        if zeta >= CRITICAL {
            return 1.0;
        }
        1.0 + (-std::f64::consts::PI * zeta / (1.0 - zeta * zeta).sqrt()).exp()
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.settle);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.settle
    }

    /// Raw progress; snaps to 1 once settled.
    fn value(&self) -> f64 {
        if self.is_complete() {
            1.0
        } else {
            self.progress_at(self.elapsed.as_secs_f64())
        }
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
