#![forbid(unsafe_code)]

//! Present/dismiss transition animator.
//!
//! [`TransitionAnimator`] animates the card's [`VisualState`] between the
//! entrance state from the direction policy and identity, along a damped
//! spring. The host calls [`AnimatedTransitioning::animate_transition`]
//! once per transition and then ticks it from its display loop.
//!
//! # State machine
//!
//! ```text
//!              animate_transition (Presenting)
//!   Idle ──────────────────────────────────────▶ Presenting ──end──▶ Idle (completed)
//!     │                                              │
//!     │        animate_transition (Dismissing)       │ animate_transition (Dismissing)
//!     └──────────────────────────────────────▶ Dismissing ◀──┘   (presenting motion stopped first)
//!                                                    │
//!                                                    └──end──▶ Idle (card removed, completed)
//!
//!   any running motion ──cancelled / interrupt()──▶ Idle (frozen, nothing completed)
//! ```
//!
//! # Invariants
//!
//! 1. At most one motion runs per animator; starting a new one stops the
//!    previous one at its current value first.
//! 2. Completion side effects (card removal, `complete_transition(true)`)
//!    run only when a motion reaches its end and the host has not
//!    cancelled.
//! 3. A cancelled or interrupted motion leaves the card exactly where it
//!    was on the last tick.
//!
//! # Failure Modes
//!
//! - Card surface missing from the container: debug assertion, no-op in
//!   release.

use std::time::Duration;

use cardpop_core::animation::{
    AnimatorSlot, Interruptible, PropertyAnimator, StopPosition, TimingCurve,
};

use crate::direction::{SourceDirection, entrance_state, exit_state};
use crate::host::{AnimatedTransitioning, TransitionContext};
use crate::surface::VisualState;

/// Default transition duration.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(380);

/// Damping ratio of the transition spring.
pub const DAMPING_RATIO: f64 = 0.7;

/// Which way the transition goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransitionPhase {
    #[default]
    Presenting,
    Dismissing,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransitionOutcome {
    /// Still animating.
    Running,
    /// Reached its end; completion side effects ran.
    Completed,
    /// The host cancelled; the card was frozen and nothing completed.
    Cancelled,
    /// Nothing to animate.
    Idle,
}

/// One present or dismiss motion.
#[derive(Debug, Clone)]
struct Motion {
    phase: TransitionPhase,
    animator: PropertyAnimator<VisualState>,
}

impl Interruptible for Motion {
    fn start(&mut self) {
        self.animator.start();
    }

    fn interrupt(&mut self) {
        self.animator.stop();
    }

    fn is_running(&self) -> bool {
        self.animator.is_running()
    }
}

/// Animates the card in and out.
///
/// The configuration (`phase`, `source`, `duration`) is read when a
/// transition starts; changing it afterwards doesn't touch the running
/// motion.
#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    phase: TransitionPhase,
    source: Option<SourceDirection>,
    duration: Duration,
    motion: AnimatorSlot<Motion>,
}

impl Default for TransitionAnimator {
    fn default() -> Self {
        Self::new(None, DEFAULT_TRANSITION_DURATION)
    }
}

impl TransitionAnimator {
    /// An idle animator configured for presenting.
    pub fn new(source: Option<SourceDirection>, duration: Duration) -> Self {
        Self {
            phase: TransitionPhase::Presenting,
            source,
            duration,
            motion: AnimatorSlot::new(),
        }
    }

    /// Set what the next [`animate_transition`](AnimatedTransitioning::animate_transition)
    /// does.
    pub fn configure(
        &mut self,
        phase: TransitionPhase,
        source: Option<SourceDirection>,
        duration: Duration,
    ) {
        self.phase = phase;
        self.source = source;
        self.duration = duration;
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_dismissing(&self) -> bool {
        self.phase == TransitionPhase::Dismissing
    }

    pub fn source(&self) -> Option<SourceDirection> {
        self.source
    }

    /// Phase of the motion currently installed, running or not.
    pub fn motion_phase(&self) -> Option<TransitionPhase> {
        self.motion.current().map(|m| m.phase)
    }

    /// Current value of the installed motion.
    pub fn current_visual(&self) -> Option<VisualState> {
        self.motion.current().map(|m| m.animator.value())
    }

    fn spring(&self, from: VisualState, to: VisualState) -> PropertyAnimator<VisualState> {
        PropertyAnimator::new(
            from,
            to,
            self.duration,
            TimingCurve::Spring {
                damping_ratio: DAMPING_RATIO,
            },
        )
    }

    fn install(&mut self, phase: TransitionPhase, animator: PropertyAnimator<VisualState>) {
        if let Some(previous) = self.motion.replace(Motion { phase, animator })
            && previous.animator.finished() == Some(StopPosition::Current)
        {
            cardpop_core::debug!(
                target: "cardpop::transition",
                interrupted = ?previous.phase,
                alpha = previous.animator.value().alpha,
                "stopped running motion before starting a new one"
            );
        }
    }

    fn animate_presenting(&mut self, context: &mut dyn TransitionContext) {
        let final_frame = context.final_frame();
        let from = entrance_state(self.source);
        let Some(surface) = context.container_mut().card_surface_mut() else {
            debug_assert!(false, "card surface missing from the container");
            return;
        };
        surface.set_frame(final_frame);
        surface.set_visual(from);

        let animator = self.spring(from, VisualState::IDENTITY);
        self.install(TransitionPhase::Presenting, animator);
        cardpop_core::debug!(
            target: "cardpop::transition",
            source = ?self.source,
            duration_ms = self.duration.as_millis() as u64,
            "presenting"
        );
    }

    fn animate_dismissing(&mut self, context: &mut dyn TransitionContext) {
        let Some(surface) = context.container().card_surface() else {
            debug_assert!(false, "card surface missing from the container");
            return;
        };
        let from = surface.visual();

        let animator = self.spring(from, exit_state(self.source));
        self.install(TransitionPhase::Dismissing, animator);
        cardpop_core::debug!(
            target: "cardpop::transition",
            source = ?self.source,
            duration_ms = self.duration.as_millis() as u64,
            "dismissing"
        );
    }
}

impl AnimatedTransitioning for TransitionAnimator {
    fn transition_duration(&self) -> Duration {
        self.duration
    }

    fn animate_transition(&mut self, context: &mut dyn TransitionContext) {
        match self.phase {
            TransitionPhase::Presenting => self.animate_presenting(context),
            TransitionPhase::Dismissing => self.animate_dismissing(context),
        }
    }

    fn tick(&mut self, dt: Duration, context: &mut dyn TransitionContext) -> TransitionOutcome {
        let Some(motion) = self.motion.current_mut() else {
            return TransitionOutcome::Idle;
        };
        if !motion.is_running() {
            return TransitionOutcome::Idle;
        }

        if context.was_cancelled() {
            motion.interrupt();
            cardpop_core::debug!(
                target: "cardpop::transition",
                phase = ?motion.phase,
                "transition cancelled by host"
            );
            return TransitionOutcome::Cancelled;
        }

        let finished = motion.animator.tick(dt);
        let visual = motion.animator.value();
        let phase = motion.phase;

        let Some(surface) = context.container_mut().card_surface_mut() else {
            debug_assert!(false, "card surface missing from the container");
            self.motion.halt();
            return TransitionOutcome::Idle;
        };
        surface.set_visual(visual);

        if finished != Some(StopPosition::End) {
            return TransitionOutcome::Running;
        }

        if phase == TransitionPhase::Dismissing {
            context.container_mut().remove_card_surface();
        }
        context.complete_transition(true);
        cardpop_core::info!(
            target: "cardpop::transition",
            phase = ?phase,
            "transition completed"
        );
        TransitionOutcome::Completed
    }

    fn interrupt(&mut self) {
        if self.motion.halt().is_some() {
            cardpop_core::debug!(target: "cardpop::transition", "transition interrupted");
        }
    }

    fn is_running(&self) -> bool {
        self.motion.is_running()
    }
}
