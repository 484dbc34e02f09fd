#![forbid(unsafe_code)]

//! Host toolkit contracts.
//!
//! CardPop does not own a view hierarchy, a transition coordinator or a
//! display loop. The host provides those through the traits here, and
//! drives the presentation through the composition seams at the bottom of
//! the file:
//!
//! - [`FrameProvider`] / [`PresentationHooks`]: what the presentation
//!   controller answers and reacts to.
//! - [`AnimatedTransitioning`]: the present/dismiss animation.
//! - [`TransitioningDelegate`]: hands out both for one presentation.
//!
//! Every call happens on the host's UI thread; nothing here is `Send`.

use std::time::Duration;

use bitflags::bitflags;
use cardpop_core::animation::Interpolate;
use cardpop_core::geometry::{Point, Rect, Size};

use crate::animator::TransitionOutcome;
use crate::backdrop::BackdropAppearance;
use crate::controller::PresentationAction;
use crate::surface::CardSurface;

bitflags! {
    /// Layers the presentation adds to the container, bottom to top.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChromeLayers: u8 {
        /// Blur effect over the presenting content.
        const BACKDROP = 1 << 0;
        /// Dimming layer above the blur.
        const DIMMING = 1 << 1;
        /// The card surface.
        const CARD = 1 << 2;
        /// The button strip, above the card.
        const AFFORDANCE = 1 << 3;
    }
}

impl ChromeLayers {
    /// Everything the controller installs around the card.
    pub const CHROME: Self = Self::BACKDROP.union(Self::DIMMING).union(Self::AFFORDANCE);
}

/// The host view that contains the presentation.
pub trait ContainerView {
    /// Full bounds, in the container's own coordinates.
    fn bounds(&self) -> Rect;

    /// Area not covered by system bars and cutouts.
    fn safe_area(&self) -> Rect;

    /// Layers currently installed.
    fn layers(&self) -> ChromeLayers;

    /// Install layers. Installing an existing layer is a no-op.
    fn insert_layers(&mut self, layers: ChromeLayers);

    /// Remove layers. Removing a missing layer is a no-op.
    fn remove_layers(&mut self, layers: ChromeLayers);

    /// The card wrapper, if installed.
    fn card_surface(&self) -> Option<&CardSurface>;

    fn card_surface_mut(&mut self) -> Option<&mut CardSurface>;

    /// Install the card wrapper at the [`ChromeLayers::CARD`] layer,
    /// replacing any existing one.
    fn insert_card_surface(&mut self, surface: CardSurface);

    /// Remove the card wrapper from the hierarchy.
    fn remove_card_surface(&mut self) -> Option<CardSurface>;
}

/// The content being presented. Borrowed, never owned, by CardPop.
pub trait PresentedContent {
    /// Size the content would like; zero components mean no preference.
    fn preferred_content_size(&self) -> Size;

    /// Whether a presentation transition for this content is in flight.
    fn is_being_presented(&self) -> bool;

    /// Whether a dismissal transition for this content is in flight.
    fn is_being_dismissed(&self) -> bool;
}

/// Backdrop and button strip state at one end of a cross-fade.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChromeAppearance {
    pub backdrop: BackdropAppearance,
    pub affordance_alpha: f64,
}

impl ChromeAppearance {
    pub const HIDDEN: Self = Self {
        backdrop: BackdropAppearance::HIDDEN,
        affordance_alpha: 0.0,
    };
}

impl Interpolate for ChromeAppearance {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            backdrop: self.backdrop.interpolate(&to.backdrop, t),
            affordance_alpha: self
                .affordance_alpha
                .interpolate(&to.affordance_alpha, t)
                .clamp(0.0, 1.0),
        }
    }
}

/// A chrome change the host animates alongside its own transition.
///
/// The controller's model already holds `to` when this is handed over;
/// the host only interpolates what it draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossFade {
    pub from: ChromeAppearance,
    pub to: ChromeAppearance,
}

/// The host's transition coordinator.
pub trait TransitionCoordinator {
    /// Animate `fade` alongside the running transition. Returns `false` if
    /// the host won't animate it (the change then applies immediately).
    fn animate_alongside(&mut self, fade: CrossFade) -> bool;

    /// Whether the interactive transition has been cancelled.
    fn is_cancelled(&self) -> bool;
}

/// Per-transition context handed to the animator.
pub trait TransitionContext {
    fn container(&self) -> &dyn ContainerView;

    fn container_mut(&mut self) -> &mut dyn ContainerView;

    /// Frame the presented card should end at.
    fn final_frame(&self) -> Rect;

    /// Whether the host cancelled this transition.
    fn was_cancelled(&self) -> bool;

    /// Report the transition finished (`true`) or abandoned (`false`).
    fn complete_transition(&mut self, completed: bool);
}

// ---------------------------------------------------------------------------
// Composition seams
// ---------------------------------------------------------------------------

/// Computes where the presented card goes.
pub trait FrameProvider {
    /// Frame of the presented card in `container`.
    fn frame_of_presented_view(
        &self,
        container: &dyn ContainerView,
        content: &dyn PresentedContent,
    ) -> Rect;

    /// Size offered to the presented content.
    fn size_for_child_content(
        &self,
        container: &dyn ContainerView,
        content: &dyn PresentedContent,
    ) -> Size {
        self.frame_of_presented_view(container, content).size()
    }
}

/// Lifecycle hooks the host calls on the presentation controller.
pub trait PresentationHooks: FrameProvider {
    fn presentation_transition_will_begin(
        &mut self,
        container: &mut dyn ContainerView,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    );

    fn presentation_transition_did_end(
        &mut self,
        container: &mut dyn ContainerView,
        completed: bool,
    );

    fn dismissal_transition_will_begin(
        &mut self,
        container: &mut dyn ContainerView,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    );

    fn dismissal_transition_did_end(&mut self, container: &mut dyn ContainerView, completed: bool);

    /// Before the container lays out its children.
    fn container_will_layout(&mut self, container: &mut dyn ContainerView);

    /// After the container laid out its children.
    fn container_did_layout(
        &mut self,
        container: &mut dyn ContainerView,
        content: &dyn PresentedContent,
    );

    /// The content's preferred size changed.
    fn preferred_content_size_did_change(
        &mut self,
        container: &mut dyn ContainerView,
        content: &dyn PresentedContent,
    );

    /// Whether a preference changed since the last layout pass.
    fn needs_layout(&self) -> bool;

    /// Advance controller-owned animations. Returns whether any is still
    /// running.
    fn tick(&mut self, dt: Duration, container: &mut dyn ContainerView) -> bool;

    /// A tap at `point` in container coordinates.
    fn handle_tap(&self, container: &dyn ContainerView, point: Point)
    -> Option<PresentationAction>;
}

/// Drives the visual present or dismiss animation.
pub trait AnimatedTransitioning {
    fn transition_duration(&self) -> Duration;

    /// Set up and start the animation for `context`.
    fn animate_transition(&mut self, context: &mut dyn TransitionContext);

    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration, context: &mut dyn TransitionContext) -> TransitionOutcome;

    /// Stop where it is without completing.
    fn interrupt(&mut self);

    fn is_running(&self) -> bool;
}

/// Supplies the controller and animators for a presentation.
pub trait TransitioningDelegate {
    type Controller: PresentationHooks;
    type Animator: AnimatedTransitioning;

    /// A fresh controller for a new presentation.
    fn presentation_controller(&mut self) -> Self::Controller;

    /// The animator configured for presenting.
    fn animator_for_presenting(&mut self) -> &mut Self::Animator;

    /// The animator configured for dismissing.
    fn animator_for_dismissing(&mut self) -> &mut Self::Animator;

    /// The animator as last configured, for ticking a transition already
    /// in flight.
    fn active_animator(&mut self) -> &mut Self::Animator;
}
