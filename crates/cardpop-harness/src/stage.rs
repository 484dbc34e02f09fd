#![forbid(unsafe_code)]

//! Headless presentation stage.
//!
//! [`Stage`] plays the host toolkit's part for any
//! [`TransitioningDelegate`]: it asks the delegate for a controller and
//! animators, calls the controller's lifecycle hooks in the order a real
//! host would, and advances everything with explicit display ticks.
//!
//! # Phases
//!
//! ```text
//!   Idle ──present()──▶ Presenting ──completed──▶ Presented
//!    ▲                    │  │                      │
//!    │          cancelled │  └──dismiss()──┐        │ dismiss() / backdrop tap
//!    ├────────────────────┘                ▼        ▼
//!    └──────────────completed───────── Dismissing ◀─┘
//!                                          │
//!                          Presented ◀─────┘ cancelled
//! ```

use std::time::Duration;

use cardpop::presentation::surface::{CardSurface, VisualState};
use cardpop::{
    AnimatedTransitioning, ContainerView, FrameProvider, Point, PresentationAction,
    PresentationHooks, PresentedContent, Rect, Size, TransitionCoordinator, TransitionOutcome,
    TransitioningDelegate,
};

use crate::host::{ContentFlags, SimContainer, SimContent, SimContext, SimCoordinator};
use crate::trace::{StagePhase, TraceEvent, TraceRecorder};

/// One display frame at 60 Hz.
pub const FRAME: Duration = Duration::from_micros(16_667);

fn ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Simulated host driving one delegate.
pub struct Stage<D: TransitioningDelegate> {
    delegate: D,
    controller: Option<D::Controller>,
    container: SimContainer,
    content: SimContent,
    coordinator: SimCoordinator,
    phase: StagePhase,
    final_frame: Rect,
    clock: Duration,
    trace: TraceRecorder,
}

impl<D: TransitioningDelegate> Stage<D> {
    pub fn new(delegate: D, container: SimContainer, content: SimContent) -> Self {
        Self {
            delegate,
            controller: None,
            container,
            content,
            coordinator: SimCoordinator::default(),
            phase: StagePhase::Idle,
            final_frame: Rect::ZERO,
            clock: Duration::ZERO,
            trace: TraceRecorder::default(),
        }
    }

    /// Replace the trace recorder.
    #[must_use]
    pub fn with_trace(mut self, trace: TraceRecorder) -> Self {
        self.trace = trace;
        self
    }

    pub fn phase(&self) -> StagePhase {
        self.phase
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// The controller of the current presentation.
    pub fn controller(&self) -> Option<&D::Controller> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut D::Controller> {
        self.controller.as_mut()
    }

    pub fn container(&self) -> &SimContainer {
        &self.container
    }

    pub fn content(&self) -> &SimContent {
        &self.content
    }

    pub fn coordinator(&self) -> &SimCoordinator {
        &self.coordinator
    }

    pub fn trace(&self) -> &TraceRecorder {
        &self.trace
    }

    /// Time advanced by ticks so far.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// The card's current frame, if on screen.
    pub fn card_frame(&self) -> Option<Rect> {
        self.container.card().map(CardSurface::frame)
    }

    /// The card's current transform and alpha, if on screen.
    pub fn card_visual(&self) -> Option<VisualState> {
        self.container.card().map(CardSurface::visual)
    }

    /// Add a free-form note to the trace.
    pub fn note(&mut self, message: impl Into<String>) {
        self.trace.record(
            ms(self.clock),
            TraceEvent::Note {
                message: message.into(),
            },
        );
    }

    /// Start presenting. Returns `false` if something is already on stage.
    pub fn present(&mut self) -> bool {
        if self.phase != StagePhase::Idle {
            tracing::debug!(phase = ?self.phase, "present ignored: stage busy");
            return false;
        }
        let duration = self.delegate.animator_for_presenting().transition_duration();
        let mut controller = self.delegate.presentation_controller();

        self.content.flags.insert(ContentFlags::BEING_PRESENTED);
        self.coordinator.begin(duration);
        controller.presentation_transition_will_begin(
            &mut self.container,
            Some(&mut self.coordinator),
        );
        controller.container_will_layout(&mut self.container);
        controller.container_did_layout(&mut self.container, &self.content);
        self.final_frame = controller.frame_of_presented_view(&self.container, &self.content);

        let mut context = SimContext::new(&mut self.container, self.final_frame, false);
        self.delegate.active_animator().animate_transition(&mut context);

        self.controller = Some(controller);
        self.phase = StagePhase::Presenting;
        self.trace.record(
            ms(self.clock),
            TraceEvent::PresentBegan {
                final_frame: self.final_frame,
                duration_ms: ms(duration),
            },
        );
        tracing::info!(final_frame = ?self.final_frame, "presentation began");
        true
    }

    /// Start dismissing. A running presentation is cut short and the card
    /// leaves from wherever it got to.
    pub fn dismiss(&mut self) -> bool {
        let Some(controller) = self.controller.as_mut() else {
            return false;
        };
        match self.phase {
            StagePhase::Presented => {}
            StagePhase::Presenting => {
                self.content.flags.remove(ContentFlags::BEING_PRESENTED);
                controller.presentation_transition_did_end(&mut self.container, true);
            }
            StagePhase::Idle | StagePhase::Dismissing => return false,
        }

        let duration = self.delegate.animator_for_dismissing().transition_duration();
        self.content.flags.insert(ContentFlags::BEING_DISMISSED);
        self.coordinator.begin(duration);
        controller.dismissal_transition_will_begin(
            &mut self.container,
            Some(&mut self.coordinator),
        );

        let from = self.container.card().map(CardSurface::visual);
        let mut context = SimContext::new(&mut self.container, self.final_frame, false);
        self.delegate.active_animator().animate_transition(&mut context);

        self.phase = StagePhase::Dismissing;
        self.trace.record(
            ms(self.clock),
            TraceEvent::DismissBegan {
                from,
                duration_ms: ms(duration),
            },
        );
        tracing::info!("dismissal began");
        true
    }

    /// Cancel the running transition, as an interactive gesture released
    /// short of the threshold would. Takes effect on the next tick.
    pub fn cancel(&mut self) -> bool {
        if !matches!(self.phase, StagePhase::Presenting | StagePhase::Dismissing) {
            return false;
        }
        self.coordinator.cancel();
        self.trace
            .record(ms(self.clock), TraceEvent::Cancelled { phase: self.phase });
        true
    }

    /// Advance by `dt`. Returns whether anything is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.clock += dt;
        self.coordinator.tick(dt);
        let mut animating = self.coordinator.is_fading();

        if matches!(self.phase, StagePhase::Presenting | StagePhase::Dismissing) {
            let cancelled = self.coordinator.is_cancelled();
            let mut context = SimContext::new(&mut self.container, self.final_frame, cancelled);
            let outcome = self.delegate.active_animator().tick(dt, &mut context);
            match outcome {
                TransitionOutcome::Running => animating = true,
                TransitionOutcome::Completed | TransitionOutcome::Cancelled => {
                    self.end_transition(outcome);
                }
                TransitionOutcome::Idle => {}
            }
        }

        let mut relayout = false;
        if let Some(controller) = self.controller.as_mut() {
            animating |= controller.tick(dt, &mut self.container);
            relayout = controller.needs_layout();
        }
        if relayout {
            self.layout_pass();
        }

        if animating {
            self.trace.record(
                ms(self.clock),
                TraceEvent::Frame {
                    phase: self.phase,
                    card: self.card_frame(),
                    visual: self.card_visual(),
                    chrome: self.coordinator.drawn(),
                },
            );
        }
        animating
    }

    fn end_transition(&mut self, outcome: TransitionOutcome) {
        let completed = outcome == TransitionOutcome::Completed;
        let ended = self.phase;
        self.coordinator.finish(completed);

        if let Some(controller) = self.controller.as_mut() {
            match ended {
                StagePhase::Presenting => {
                    self.content.flags.remove(ContentFlags::BEING_PRESENTED);
                    controller.presentation_transition_did_end(&mut self.container, completed);
                }
                StagePhase::Dismissing => {
                    self.content.flags.remove(ContentFlags::BEING_DISMISSED);
                    controller.dismissal_transition_did_end(&mut self.container, completed);
                    if !completed {
                        // The host puts the card back where it was.
                        if let Some(card) = self.container.card_surface_mut() {
                            card.set_visual(VisualState::IDENTITY);
                        }
                    }
                }
                StagePhase::Idle | StagePhase::Presented => {}
            }
        }

        self.phase = match (ended, completed) {
            (StagePhase::Presenting, true) => StagePhase::Presented,
            (StagePhase::Dismissing, false) => StagePhase::Presented,
            _ => StagePhase::Idle,
        };
        if self.phase == StagePhase::Idle {
            self.controller = None;
        }
        self.trace.record(
            ms(self.clock),
            TraceEvent::TransitionEnded {
                phase: ended,
                outcome,
            },
        );
        tracing::info!(?ended, ?outcome, "transition ended");
    }

    /// Run the controller's layout hooks.
    pub fn layout_pass(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        controller.container_will_layout(&mut self.container);
        controller.container_did_layout(&mut self.container, &self.content);
        if !self.content.is_being_dismissed() {
            self.final_frame = controller.frame_of_presented_view(&self.container, &self.content);
        }
        self.trace.record(
            ms(self.clock),
            TraceEvent::Layout {
                card: self.container.card().map(CardSurface::frame),
            },
        );
    }

    /// Resize the container (rotation, split view) and lay out again.
    pub fn resize(&mut self, bounds: Rect, safe_area: Rect) {
        self.container.resize(bounds, safe_area);
        self.layout_pass();
    }

    /// Change the content's preferred size.
    pub fn set_preferred_size(&mut self, preferred: Size) {
        self.content.preferred = preferred;
        self.trace
            .record(ms(self.clock), TraceEvent::ContentSizeChanged { preferred });
        if let Some(controller) = self.controller.as_mut() {
            controller.preferred_content_size_did_change(&mut self.container, &self.content);
        }
    }

    /// Tap at `point`. A dismissal request dismisses.
    pub fn tap(&mut self, point: Point) -> Option<PresentationAction> {
        let action = self
            .controller
            .as_ref()
            .and_then(|c| c.handle_tap(&self.container, point));
        self.trace
            .record(ms(self.clock), TraceEvent::Tap { point, action });
        if action == Some(PresentationAction::DismissRequested) {
            self.dismiss();
        }
        action
    }

    /// Tick until nothing animates or `max_ticks` pass. Returns the ticks run.
    pub fn run_until_idle(&mut self, dt: Duration, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while ticks < max_ticks {
            ticks += 1;
            if !self.tick(dt) {
                break;
            }
        }
        ticks
    }

    /// Tick for `duration` of stage time.
    pub fn run_for(&mut self, duration: Duration, dt: Duration) -> usize {
        let end = self.clock + duration;
        let mut ticks = 0;
        while self.clock < end {
            self.tick(dt);
            ticks += 1;
        }
        ticks
    }
}
