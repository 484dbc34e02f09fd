#![forbid(unsafe_code)]

//! Simulated host toolkit.
//!
//! In-memory implementations of the host contracts: a container with a
//! layer set and an optional card, presented content with a preferred
//! size, a coordinator that plays chrome cross-fades, and a per-call
//! transition context.

use std::time::Duration;

use bitflags::bitflags;
use cardpop::core::animation::{PropertyAnimator, TimingCurve};
use cardpop::presentation::host::{
    ChromeAppearance, ChromeLayers, ContainerView, CrossFade, PresentedContent, TransitionContext,
    TransitionCoordinator,
};
use cardpop::presentation::surface::CardSurface;
use cardpop::{Rect, Size};

/// Portrait phone: 390×844 with a 47pt top and 34pt bottom safe-area inset.
pub const PHONE_BOUNDS: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);
pub const PHONE_SAFE_AREA: Rect = Rect::new(0.0, 47.0, 390.0, 763.0);

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// The view the presentation lives in.
#[derive(Debug, Clone)]
pub struct SimContainer {
    bounds: Rect,
    safe_area: Rect,
    layers: ChromeLayers,
    card: Option<CardSurface>,
}

impl Default for SimContainer {
    fn default() -> Self {
        Self::new(PHONE_BOUNDS, PHONE_SAFE_AREA)
    }
}

impl SimContainer {
    pub fn new(bounds: Rect, safe_area: Rect) -> Self {
        Self {
            bounds,
            safe_area,
            layers: ChromeLayers::empty(),
            card: None,
        }
    }

    /// Resize the container, as on rotation.
    pub fn resize(&mut self, bounds: Rect, safe_area: Rect) {
        self.bounds = bounds;
        self.safe_area = safe_area;
    }

    /// The card, if on screen.
    pub fn card(&self) -> Option<&CardSurface> {
        self.card.as_ref()
    }
}

impl ContainerView for SimContainer {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn safe_area(&self) -> Rect {
        self.safe_area
    }

    fn layers(&self) -> ChromeLayers {
        self.layers
    }

    fn insert_layers(&mut self, layers: ChromeLayers) {
        self.layers |= layers;
    }

    fn remove_layers(&mut self, layers: ChromeLayers) {
        self.layers.remove(layers);
    }

    fn card_surface(&self) -> Option<&CardSurface> {
        self.card.as_ref()
    }

    fn card_surface_mut(&mut self) -> Option<&mut CardSurface> {
        self.card.as_mut()
    }

    fn insert_card_surface(&mut self, surface: CardSurface) {
        self.card = Some(surface);
        self.layers |= ChromeLayers::CARD;
    }

    fn remove_card_surface(&mut self) -> Option<CardSurface> {
        self.layers.remove(ChromeLayers::CARD);
        self.card.take()
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

bitflags! {
    /// Transition state of the presented content.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContentFlags: u8 {
        const BEING_PRESENTED = 1 << 0;
        const BEING_DISMISSED = 1 << 1;
    }
}

/// Presented content: a preferred size and its transition flags.
#[derive(Debug, Clone, Default)]
pub struct SimContent {
    pub preferred: Size,
    pub flags: ContentFlags,
}

impl SimContent {
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            flags: ContentFlags::empty(),
        }
    }
}

impl PresentedContent for SimContent {
    fn preferred_content_size(&self) -> Size {
        self.preferred
    }

    fn is_being_presented(&self) -> bool {
        self.flags.contains(ContentFlags::BEING_PRESENTED)
    }

    fn is_being_dismissed(&self) -> bool {
        self.flags.contains(ContentFlags::BEING_DISMISSED)
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Plays the chrome cross-fade alongside a transition.
#[derive(Debug, Clone)]
pub struct SimCoordinator {
    duration: Duration,
    fade: Option<CrossFade>,
    animator: Option<PropertyAnimator<ChromeAppearance>>,
    drawn: ChromeAppearance,
    cancelled: bool,
}

impl Default for SimCoordinator {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(380),
            fade: None,
            animator: None,
            drawn: ChromeAppearance::HIDDEN,
            cancelled: false,
        }
    }
}

impl SimCoordinator {
    /// Start a new transition lasting `duration`.
    pub fn begin(&mut self, duration: Duration) {
        self.duration = duration;
        self.cancelled = false;
    }

    /// Cancel the running transition, as an interactive gesture would.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Advance the cross-fade.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(animator) = self.animator.as_mut() {
            animator.tick(dt);
            self.drawn = animator.value();
        }
    }

    /// End the transition: jump to the fade's end, or back to its start if
    /// the transition was cancelled.
    pub fn finish(&mut self, completed: bool) {
        if let Some(fade) = self.fade.take() {
            self.drawn = if completed { fade.to } else { fade.from };
        }
        self.animator = None;
        self.cancelled = false;
    }

    /// What the host is drawing right now.
    pub fn drawn(&self) -> ChromeAppearance {
        self.drawn
    }

    /// Commit `appearance` without animating.
    pub fn snap(&mut self, appearance: ChromeAppearance) {
        self.fade = None;
        self.animator = None;
        self.drawn = appearance;
    }

    pub fn is_fading(&self) -> bool {
        self.animator.as_ref().is_some_and(PropertyAnimator::is_running)
    }
}

impl TransitionCoordinator for SimCoordinator {
    fn animate_alongside(&mut self, fade: CrossFade) -> bool {
        let mut animator =
            PropertyAnimator::new(self.drawn, fade.to, self.duration, TimingCurve::Linear);
        animator.start();
        self.fade = Some(CrossFade {
            from: self.drawn,
            to: fade.to,
        });
        self.animator = Some(animator);
        true
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

// ---------------------------------------------------------------------------
// Transition context
// ---------------------------------------------------------------------------

/// Context for one animator call.
pub struct SimContext<'a> {
    container: &'a mut SimContainer,
    final_frame: Rect,
    cancelled: bool,
    completed: Option<bool>,
}

impl<'a> SimContext<'a> {
    pub fn new(container: &'a mut SimContainer, final_frame: Rect, cancelled: bool) -> Self {
        Self {
            container,
            final_frame,
            cancelled,
            completed: None,
        }
    }

    /// What the animator reported through `complete_transition`, if anything.
    pub fn completed(&self) -> Option<bool> {
        self.completed
    }
}

impl TransitionContext for SimContext<'_> {
    fn container(&self) -> &dyn ContainerView {
        &*self.container
    }

    fn container_mut(&mut self) -> &mut dyn ContainerView {
        &mut *self.container
    }

    fn final_frame(&self) -> Rect {
        self.final_frame
    }

    fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    fn complete_transition(&mut self, completed: bool) {
        self.completed = Some(completed);
    }
}
