#![forbid(unsafe_code)]

//! Presentation controller.
//!
//! Owns the chrome around the card (backdrop and button strip) and keeps
//! the card's frame fitted to the container. The host calls the
//! [`PresentationHooks`] at each point of the presentation lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//!   Detached ──will_begin(presentation)──▶ Presenting ──did_end(true)──▶ Presented
//!                                              │                            │
//!                                       did_end(false)           will_begin(dismissal)
//!                                              ▼                            ▼
//!                                          Detached ◀──did_end(true)──── Dismissing
//!                                                                           │
//!                                                Presented ◀──did_end(false)┘
//! ```
//!
//! # Frame updates
//!
//! Every layout pass refits the card and assigns the frame directly. A
//! change of the content's preferred size after the transition settled
//! instead animates the card to its new frame over a short linear resize;
//! a second change mid-resize stops the first resize where it is and
//! starts a new one from there. Layout passes during a resize re-aim it at
//! the freshly fitted frame rather than snapping.

use std::time::Duration;

use cardpop_core::animation::{AnimatorSlot, PropertyAnimator, StopPosition, TimingCurve};
use cardpop_core::geometry::{Insets, Point, Rect};

use crate::affordance::{AffordanceButton, ButtonId, ButtonRole, DismissAffordance};
use crate::backdrop::{Backdrop, BackdropAppearance};
use crate::config::PopoverConfig;
use crate::fitter::{SizePreference, fit};
use crate::host::{
    ChromeAppearance, ChromeLayers, ContainerView, CrossFade, FrameProvider, PresentationHooks,
    PresentedContent, TransitionCoordinator,
};
use crate::surface::CardSurface;

/// Something the app should do in response to a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PresentationAction {
    /// Dismiss the presented card.
    DismissRequested,
    /// A custom button in the strip was tapped.
    ButtonActivated(ButtonId),
}

/// Where the controller is in the presentation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChromePhase {
    /// Chrome not installed.
    #[default]
    Detached,
    /// Presentation transition running.
    Presenting,
    /// On screen and settled.
    Presented,
    /// Dismissal transition running.
    Dismissing,
}

/// Presentation controller for a card popover.
#[derive(Debug)]
pub struct PresentationController {
    insets: Insets,
    prefers_blurred_background: bool,
    prefers_dimmed_presenting_view: bool,
    frame_update_duration: Duration,
    backdrop: Backdrop,
    affordance: DismissAffordance,
    frame_change: AnimatorSlot<PropertyAnimator<Rect>>,
    phase: ChromePhase,
    needs_layout: bool,
}

impl Default for PresentationController {
    fn default() -> Self {
        Self::new(&PopoverConfig::default())
    }
}

impl PresentationController {
    /// Create from `config`. Chrome is built here, installed later.
    pub fn new(config: &PopoverConfig) -> Self {
        let mut affordance = DismissAffordance::new();
        affordance.set_dismiss_label(config.effective_dismiss_label());
        Self {
            insets: config.content_insets,
            prefers_blurred_background: config.prefers_blurred_background,
            prefers_dimmed_presenting_view: config.prefers_dimmed_presenting_view,
            frame_update_duration: config.frame_update_duration,
            backdrop: Backdrop::new(),
            affordance,
            frame_change: AnimatorSlot::new(),
            phase: ChromePhase::Detached,
            needs_layout: false,
        }
    }

    pub fn phase(&self) -> ChromePhase {
        self.phase
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn affordance(&self) -> &DismissAffordance {
        &self.affordance
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    pub fn prefers_blurred_background(&self) -> bool {
        self.prefers_blurred_background
    }

    /// Toggle the backdrop blur. Takes effect on the next layout pass.
    pub fn set_prefers_blurred_background(&mut self, blurred: bool) {
        if self.prefers_blurred_background != blurred {
            self.prefers_blurred_background = blurred;
            self.needs_layout = true;
        }
    }

    pub fn prefers_dimmed_presenting_view(&self) -> bool {
        self.prefers_dimmed_presenting_view
    }

    /// Toggle the dimming layer. Takes effect on the next layout pass.
    pub fn set_prefers_dimmed_presenting_view(&mut self, dimmed: bool) {
        if self.prefers_dimmed_presenting_view != dimmed {
            self.prefers_dimmed_presenting_view = dimmed;
            self.needs_layout = true;
        }
    }

    /// Set the dismiss button title; `None` or empty hides it.
    pub fn set_dismiss_label(&mut self, label: Option<&str>) {
        self.affordance.set_dismiss_label(label);
        self.needs_layout = true;
    }

    /// Add a button to the strip under the card.
    pub fn add_button(&mut self, button: AffordanceButton) {
        self.affordance.add_button(button);
        self.needs_layout = true;
    }

    /// Remove a button from the strip.
    pub fn remove_button(&mut self, role: ButtonRole) -> bool {
        let removed = self.affordance.remove_button(role);
        self.needs_layout |= removed;
        removed
    }

    /// Scroll the button strip horizontally.
    pub fn scroll_buttons(&mut self, dx: f64) -> f64 {
        self.affordance.scroll_by(dx)
    }

    /// Whether a resize animation is running.
    pub fn is_animating_frame_change(&self) -> bool {
        self.frame_change.is_running()
    }

    /// Whether the running resize lets taps through to the card.
    pub fn allows_user_interaction(&self) -> bool {
        self.frame_change
            .current()
            .filter(|a| a.is_running())
            .is_none_or(PropertyAnimator::is_user_interaction_enabled)
    }

    /// Backdrop and strip appearance the preferences call for.
    fn target_chrome(&self) -> ChromeAppearance {
        ChromeAppearance {
            backdrop: BackdropAppearance::for_preferences(
                self.prefers_blurred_background,
                self.prefers_dimmed_presenting_view,
            ),
            affordance_alpha: 1.0,
        }
    }

    fn current_chrome(&self) -> ChromeAppearance {
        ChromeAppearance {
            backdrop: self.backdrop.appearance(),
            affordance_alpha: self.affordance.alpha(),
        }
    }

    fn apply_chrome(&mut self, chrome: ChromeAppearance) {
        self.backdrop.set_appearance(chrome.backdrop);
        self.affordance.set_alpha(chrome.affordance_alpha);
    }

    /// Hand `to` to the host to animate and commit it to the model.
    fn cross_fade(
        &mut self,
        to: ChromeAppearance,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    ) {
        let fade = CrossFade {
            from: self.current_chrome(),
            to,
        };
        if !coordinator.is_some_and(|c| c.animate_alongside(fade)) {
            cardpop_core::debug!(
                target: "cardpop::controller",
                "no host cross-fade; chrome committed directly"
            );
        }
        cardpop_core::debug!(
            target: "cardpop::controller",
            blur = to.backdrop.blur,
            dimming = to.backdrop.dimming,
            affordance_alpha = to.affordance_alpha,
            "chrome cross-fade"
        );
        self.apply_chrome(to);
    }

    fn remove_chrome(&mut self, container: &mut dyn ContainerView) {
        container.remove_layers(ChromeLayers::CHROME);
        self.frame_change.halt();
        self.apply_chrome(ChromeAppearance::HIDDEN);
        self.phase = ChromePhase::Detached;
    }

    fn fitted_frame(&self, container: &dyn ContainerView, preference: SizePreference) -> Rect {
        let obstruction = self.affordance.obstruction();
        fit(
            container.bounds(),
            container.safe_area(),
            preference,
            self.insets,
            obstruction.as_slice(),
        )
    }
}

impl FrameProvider for PresentationController {
    fn frame_of_presented_view(
        &self,
        container: &dyn ContainerView,
        content: &dyn PresentedContent,
    ) -> Rect {
        self.fitted_frame(container, content.preferred_content_size().into())
    }
}

impl PresentationHooks for PresentationController {
    fn presentation_transition_will_begin(
        &mut self,
        container: &mut dyn ContainerView,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    ) {
        container.insert_layers(ChromeLayers::CHROME);
        if container.card_surface().is_none() {
            container.insert_card_surface(CardSurface::new());
        }
        self.affordance.layout(container.safe_area(), self.insets.width);
        self.apply_chrome(ChromeAppearance::HIDDEN);
        self.phase = ChromePhase::Presenting;
        self.cross_fade(self.target_chrome(), coordinator);
    }

    fn presentation_transition_did_end(
        &mut self,
        container: &mut dyn ContainerView,
        completed: bool,
    ) {
        if completed {
            self.phase = ChromePhase::Presented;
        } else {
            container.remove_card_surface();
            self.remove_chrome(container);
        }
    }

    fn dismissal_transition_will_begin(
        &mut self,
        _container: &mut dyn ContainerView,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    ) {
        self.frame_change.halt();
        self.phase = ChromePhase::Dismissing;
        self.cross_fade(ChromeAppearance::HIDDEN, coordinator);
    }

    fn dismissal_transition_did_end(&mut self, container: &mut dyn ContainerView, completed: bool) {
        if completed {
            self.remove_chrome(container);
        } else {
            self.phase = ChromePhase::Presented;
            self.apply_chrome(self.target_chrome());
        }
    }

    fn container_will_layout(&mut self, container: &mut dyn ContainerView) {
        self.affordance.layout(container.safe_area(), self.insets.width);
        if let Some(card) = container.card_surface_mut() {
            // A blurred backdrop gets an opaque card and vice versa.
            card.set_prefers_blurred_background(!self.prefers_blurred_background);
        }
        if matches!(self.phase, ChromePhase::Presenting | ChromePhase::Presented) {
            let target = self.target_chrome();
            self.backdrop.set_appearance(target.backdrop);
        }
        self.needs_layout = false;
    }

    fn container_did_layout(
        &mut self,
        container: &mut dyn ContainerView,
        content: &dyn PresentedContent,
    ) {
        if content.is_being_dismissed() {
            return;
        }
        let frame = self.frame_of_presented_view(container, content);
        if let Some(resize) = self.frame_change.current_mut().filter(|a| a.is_running()) {
            resize.retarget(frame);
            return;
        }
        if let Some(card) = container.card_surface_mut() {
            card.set_frame(frame);
        }
    }

    fn preferred_content_size_did_change(
        &mut self,
        container: &mut dyn ContainerView,
        content: &dyn PresentedContent,
    ) {
        if content.is_being_presented() || content.is_being_dismissed() {
            return;
        }
        let Some(from) = container.card_surface().map(CardSurface::frame) else {
            return;
        };
        let to = self.frame_of_presented_view(container, content);
        let resize =
            PropertyAnimator::new(from, to, self.frame_update_duration, TimingCurve::Linear)
                .allows_user_interaction(true);
        let interrupted = self
            .frame_change
            .replace(resize)
            .is_some_and(|previous| previous.finished() == Some(StopPosition::Current));
        if interrupted {
            cardpop_core::debug!(
                target: "cardpop::controller",
                "content size changed mid-resize; restarting from current frame"
            );
        }
        cardpop_core::debug!(
            target: "cardpop::controller",
            from_height = from.height,
            to_height = to.height,
            "animating frame change"
        );
    }

    fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    fn tick(&mut self, dt: Duration, container: &mut dyn ContainerView) -> bool {
        let Some(resize) = self.frame_change.current_mut() else {
            return false;
        };
        if !resize.is_running() {
            return false;
        }
        let finished = resize.tick(dt);
        let frame = resize.value();
        if let Some(card) = container.card_surface_mut() {
            card.set_frame(frame);
        }
        if finished.is_some() {
            self.frame_change.take();
            return false;
        }
        true
    }

    fn handle_tap(
        &self,
        container: &dyn ContainerView,
        point: Point,
    ) -> Option<PresentationAction> {
        if self.phase == ChromePhase::Detached {
            return None;
        }
        if let Some(role) = self.affordance.hit_test(point) {
            return Some(match role {
                ButtonRole::Dismiss => PresentationAction::DismissRequested,
                ButtonRole::Custom(id) => PresentationAction::ButtonActivated(id),
            });
        }
        if container.card_surface().is_some_and(|card| card.hit_test(point)) {
            return None;
        }
        container
            .bounds()
            .contains_point(point)
            .then_some(PresentationAction::DismissRequested)
    }
}

#[cfg(test)]
mod tests {
    use cardpop_core::geometry::Size;

    use super::*;

    #[derive(Default)]
    struct Container {
        safe_area: Option<Rect>,
        layers: ChromeLayers,
        card: Option<CardSurface>,
    }

    impl ContainerView for Container {
        fn bounds(&self) -> Rect {
            Rect::new(0.0, 0.0, 400.0, 800.0)
        }
        fn safe_area(&self) -> Rect {
            self.safe_area.unwrap_or_else(|| self.bounds())
        }
        fn layers(&self) -> ChromeLayers {
            self.layers
        }
        fn insert_layers(&mut self, layers: ChromeLayers) {
            self.layers |= layers;
        }
        fn remove_layers(&mut self, layers: ChromeLayers) {
            self.layers &= !layers;
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
            self.layers &= !ChromeLayers::CARD;
            self.card.take()
        }
    }

    #[derive(Default)]
    struct Content {
        preferred: Size,
        presenting: bool,
        dismissing: bool,
    }

    impl PresentedContent for Content {
        fn preferred_content_size(&self) -> Size {
            self.preferred
        }
        fn is_being_presented(&self) -> bool {
            self.presenting
        }
        fn is_being_dismissed(&self) -> bool {
            self.dismissing
        }
    }

    #[derive(Default)]
    struct Coordinator {
        fades: Vec<CrossFade>,
    }

    impl TransitionCoordinator for Coordinator {
        fn animate_alongside(&mut self, fade: CrossFade) -> bool {
            self.fades.push(fade);
            true
        }
        fn is_cancelled(&self) -> bool {
            false
        }
    }

    const TICK: Duration = Duration::from_millis(17);

    fn presented(config: &PopoverConfig) -> (PresentationController, Container, Content) {
        let mut controller = PresentationController::new(config);
        let mut container = Container::default();
        let content = Content::default();
        controller.presentation_transition_will_begin(&mut container, None);
        controller.container_will_layout(&mut container);
        controller.container_did_layout(&mut container, &content);
        controller.presentation_transition_did_end(&mut container, true);
        (controller, container, content)
    }

    fn card_frame(container: &Container) -> Rect {
        container.card.as_ref().expect("card installed").frame()
    }

    #[test]
    fn presentation_installs_chrome_and_cross_fades_in() {
        let mut controller = PresentationController::new(&PopoverConfig::default());
        let mut container = Container::default();
        let mut coordinator = Coordinator::default();
        controller.presentation_transition_will_begin(&mut container, Some(&mut coordinator));

        assert!(container.layers.contains(ChromeLayers::CHROME | ChromeLayers::CARD));
        assert_eq!(coordinator.fades.len(), 1);
        let fade = coordinator.fades[0];
        assert_eq!(fade.from.affordance_alpha, 0.0);
        assert_eq!(fade.to.affordance_alpha, 1.0);
        assert!(fade.to.backdrop.is_blurred());
        assert_eq!(controller.backdrop().appearance(), fade.to.backdrop);
        assert_eq!(controller.phase(), ChromePhase::Presenting);
    }

    #[test]
    fn dismissal_cross_fades_out_and_cleans_up() {
        let (mut controller, mut container, _) = presented(&PopoverConfig::default());
        let mut coordinator = Coordinator::default();
        controller.dismissal_transition_will_begin(&mut container, Some(&mut coordinator));
        assert_eq!(coordinator.fades[0].to, ChromeAppearance::HIDDEN);
        assert_eq!(controller.phase(), ChromePhase::Dismissing);

        controller.dismissal_transition_did_end(&mut container, true);
        assert_eq!(container.layers & ChromeLayers::CHROME, ChromeLayers::empty());
        assert_eq!(controller.phase(), ChromePhase::Detached);
    }

    struct Declining;

    impl TransitionCoordinator for Declining {
        fn animate_alongside(&mut self, _fade: CrossFade) -> bool {
            false
        }
        fn is_cancelled(&self) -> bool {
            false
        }
    }

    #[test]
    fn declined_cross_fade_still_commits_chrome() {
        let mut controller = PresentationController::new(&PopoverConfig::default());
        let mut container = Container::default();
        controller.presentation_transition_will_begin(&mut container, Some(&mut Declining));
        assert!(controller.backdrop().appearance().is_visible());
        assert_eq!(controller.affordance().alpha(), 1.0);

        controller.dismissal_transition_will_begin(&mut container, Some(&mut Declining));
        assert_eq!(controller.backdrop().appearance(), ChromeAppearance::HIDDEN.backdrop);
        assert_eq!(controller.affordance().alpha(), 0.0);
    }

    #[test]
    fn cancelled_dismissal_restores_chrome() {
        let (mut controller, mut container, _) = presented(&PopoverConfig::default());
        controller.dismissal_transition_will_begin(&mut container, None);
        controller.dismissal_transition_did_end(&mut container, false);
        assert_eq!(controller.phase(), ChromePhase::Presented);
        assert!(controller.backdrop().appearance().is_visible());
        assert!(container.layers.contains(ChromeLayers::CHROME));
    }

    #[test]
    fn aborted_presentation_removes_everything() {
        let mut controller = PresentationController::default();
        let mut container = Container::default();
        controller.presentation_transition_will_begin(&mut container, None);
        controller.presentation_transition_did_end(&mut container, false);
        assert!(container.card.is_none());
        assert_eq!(container.layers, ChromeLayers::empty());
    }

    #[test]
    fn layout_fits_card() {
        let (_, container, _) = presented(&PopoverConfig::default());
        assert_eq!(card_frame(&container), Rect::new(14.0, 44.0, 372.0, 712.0));
    }

    #[test]
    fn dismiss_button_shortens_card() {
        let config = PopoverConfig::default().dismiss_label("Close");
        let (controller, container, _) = presented(&config);
        let strip = controller.affordance().frame();
        assert_eq!(strip.max_y(), 800.0 - 24.0);
        // Card bottom stops 24 above the strip.
        assert_eq!(card_frame(&container).max_y(), strip.min_y() - 24.0);
    }

    #[test]
    fn blurred_backdrop_gets_opaque_card() {
        let (mut controller, mut container, _) = presented(&PopoverConfig::default());
        assert!(!container.card.as_ref().is_some_and(CardSurface::prefers_blurred_background));

        controller.set_prefers_blurred_background(false);
        assert!(controller.needs_layout());
        controller.container_will_layout(&mut container);
        assert!(!controller.needs_layout());
        assert!(container.card.as_ref().is_some_and(CardSurface::prefers_blurred_background));
        assert!(!controller.backdrop().appearance().is_blurred());
    }

    #[test]
    fn dimming_preference_toggles_dimming_only() {
        let (mut controller, mut container, _) = presented(&PopoverConfig::default());
        controller.set_prefers_dimmed_presenting_view(false);
        controller.container_will_layout(&mut container);
        let appearance = controller.backdrop().appearance();
        assert_eq!(appearance.dimming, 0.0);
        assert!(appearance.is_blurred());
    }

    #[test]
    fn size_change_animates_linearly() {
        let (mut controller, mut container, mut content) = presented(&PopoverConfig::default());
        content.preferred = Size::new(0.0, 200.0);
        controller.preferred_content_size_did_change(&mut container, &content);
        assert!(controller.is_animating_frame_change());
        assert!(controller.allows_user_interaction());

        // Halfway: height between 712 and 200.
        for _ in 0..10 {
            controller.tick(TICK, &mut container);
        }
        let mid = card_frame(&container);
        assert!(mid.height < 712.0 && mid.height > 200.0);

        while controller.tick(TICK, &mut container) {}
        assert_eq!(card_frame(&container), Rect::new(14.0, 300.0, 372.0, 200.0));
        assert!(!controller.is_animating_frame_change());
    }

    #[test]
    fn size_change_ignored_during_transitions() {
        let (mut controller, mut container, mut content) = presented(&PopoverConfig::default());
        content.preferred = Size::new(0.0, 200.0);
        content.presenting = true;
        controller.preferred_content_size_did_change(&mut container, &content);
        assert!(!controller.is_animating_frame_change());
        content.presenting = false;
        content.dismissing = true;
        controller.preferred_content_size_did_change(&mut container, &content);
        assert!(!controller.is_animating_frame_change());
    }

    #[test]
    fn second_size_change_restarts_from_current_frame() {
        let (mut controller, mut container, mut content) = presented(&PopoverConfig::default());
        content.preferred = Size::new(0.0, 200.0);
        controller.preferred_content_size_did_change(&mut container, &content);
        for _ in 0..5 {
            controller.tick(TICK, &mut container);
        }
        let interrupted = card_frame(&container);

        content.preferred = Size::new(0.0, 600.0);
        controller.preferred_content_size_did_change(&mut container, &content);
        controller.tick(Duration::from_nanos(1), &mut container);
        let restarted = card_frame(&container);
        assert!((restarted.height - interrupted.height).abs() < 0.01);

        while controller.tick(TICK, &mut container) {}
        assert_eq!(card_frame(&container).height, 600.0);
    }

    #[test]
    fn layout_mid_resize_retargets() {
        let (mut controller, mut container, mut content) = presented(&PopoverConfig::default());
        content.preferred = Size::new(0.0, 200.0);
        controller.preferred_content_size_did_change(&mut container, &content);
        controller.tick(TICK, &mut container);
        let before = card_frame(&container);

        // Rotation-like layout pass with a tighter safe area.
        container.safe_area = Some(Rect::new(0.0, 50.0, 400.0, 700.0));
        controller.container_will_layout(&mut container);
        controller.container_did_layout(&mut container, &content);
        assert_eq!(card_frame(&container), before);
        assert!(controller.is_animating_frame_change());

        while controller.tick(TICK, &mut container) {}
        assert_eq!(card_frame(&container), Rect::new(14.0, 300.0, 372.0, 200.0));
    }

    #[test]
    fn layout_skipped_while_dismissing() {
        let (mut controller, mut container, mut content) = presented(&PopoverConfig::default());
        let before = card_frame(&container);
        content.dismissing = true;
        container.safe_area = Some(Rect::new(0.0, 100.0, 400.0, 600.0));
        controller.container_did_layout(&mut container, &content);
        assert_eq!(card_frame(&container), before);
    }

    #[test]
    fn taps_route_by_layer() {
        let config = PopoverConfig::default().dismiss_label("Close");
        let (mut controller, mut container, _) = presented(&config);
        controller.add_button(AffordanceButton::custom(ButtonId(7), "Share"));
        controller.container_will_layout(&mut container);

        let strip = controller.affordance().frame();
        let first = Point::new(strip.min_x() + 1.0, strip.mid_y());
        let last = Point::new(strip.max_x() - 1.0, strip.mid_y());
        assert_eq!(
            controller.handle_tap(&container, first),
            Some(PresentationAction::DismissRequested)
        );
        assert_eq!(
            controller.handle_tap(&container, last),
            Some(PresentationAction::ButtonActivated(ButtonId(7)))
        );
        assert_eq!(controller.handle_tap(&container, Point::new(200.0, 300.0)), None);
        assert_eq!(
            controller.handle_tap(&container, Point::new(5.0, 5.0)),
            Some(PresentationAction::DismissRequested)
        );
    }

    #[test]
    fn detached_controller_ignores_taps() {
        let controller = PresentationController::default();
        let container = Container::default();
        assert_eq!(controller.handle_tap(&container, Point::new(5.0, 5.0)), None);
    }
}
