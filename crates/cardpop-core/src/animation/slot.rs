#![forbid(unsafe_code)]

//! Single-occupancy animator slot.
//!
//! An [`AnimatorSlot`] owns at most one animator for a given role (the
//! present/dismiss motion, the frame-change resize, ...). Installing a new
//! animator with [`AnimatorSlot::replace`] first stops the previous one at
//! its current value and only then starts the new one, so two animators of
//! the same role never run at the same time.
//!
//! # State machine
//!
//! ```text
//!   Idle ──replace(a)──▶ Running(a) ──replace(b)──▶ Running(b)   (a stopped first)
//!     ▲                      │
//!     └──────take()/halt()───┘
//! ```

use super::property::{Interpolate, PropertyAnimator};

/// An animation that can be started and stopped mid-flight.
pub trait Interruptible {
    /// Begin running.
    fn start(&mut self);

    /// Stop immediately at the current value, skipping completion.
    fn interrupt(&mut self);

    /// Whether the animation is currently running.
    fn is_running(&self) -> bool;
}

impl<T: Interpolate> Interruptible for PropertyAnimator<T> {
    fn start(&mut self) {
        PropertyAnimator::start(self);
    }

    fn interrupt(&mut self) {
        self.stop();
    }

    fn is_running(&self) -> bool {
        PropertyAnimator::is_running(self)
    }
}

/// Holds at most one animator for a role.
#[derive(Debug, Clone, Default)]
pub enum AnimatorSlot<A> {
    /// No animator installed.
    #[default]
    Idle,
    /// An animator is installed; it may still be running or may have
    /// finished since the last tick.
    Running(A),
}

impl<A: Interruptible> AnimatorSlot<A> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self::Idle
    }

    /// Stop the current animator (if any) at its current value, then start
    /// and install `next`.
    ///
    /// Returns the previous animator, frozen where it was interrupted.
    pub fn replace(&mut self, mut next: A) -> Option<A> {
        let previous = self.halt();
        next.start();
        *self = Self::Running(next);
        previous
    }

    /// Stop the current animator (if any) and empty the slot.
    pub fn halt(&mut self) -> Option<A> {
        let mut previous = self.take()?;
        if previous.is_running() {
            previous.interrupt();
        }
        Some(previous)
    }

    /// Remove the current animator without stopping it.
    pub fn take(&mut self) -> Option<A> {
        match std::mem::take(self) {
            Self::Running(animator) => Some(animator),
            Self::Idle => None,
        }
    }

    /// The installed animator.
    pub fn current(&self) -> Option<&A> {
        match self {
            Self::Running(animator) => Some(animator),
            Self::Idle => None,
        }
    }

    /// The installed animator, mutably.
    pub fn current_mut(&mut self) -> Option<&mut A> {
        match self {
            Self::Running(animator) => Some(animator),
            Self::Idle => None,
        }
    }

    /// Whether an installed animator is actively running.
    pub fn is_running(&self) -> bool {
        self.current().is_some_and(Interruptible::is_running)
    }

    /// Whether the slot is empty.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
