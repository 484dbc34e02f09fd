#![forbid(unsafe_code)]

//! The transitioning delegate apps hold on to.
//!
//! [`CardPopoverPresentation`] is the one object an app configures. The
//! host asks it for a [`PresentationController`] when a presentation
//! starts and for the [`TransitionAnimator`] each time a transition runs.
//! A single animator is reused for both directions; the direction and
//! duration it runs with are whatever was set when it was handed out.
//!
//! ```ignore
//! let mut popover = CardPopoverPresentation::new(Some(SourceDirection::Left));
//! popover.set_transition_duration(Duration::from_millis(250));
//! let controller = popover.presentation_controller();
//! popover.animator_for_presenting().animate_transition(&mut context);
//! ```

use std::time::Duration;

use crate::animator::{TransitionAnimator, TransitionPhase};
use crate::config::PopoverConfig;
use crate::controller::PresentationController;
use crate::direction::SourceDirection;
use crate::error::ConfigError;
use crate::host::TransitioningDelegate;

/// Card popover configuration plus the animator it hands out.
#[derive(Debug, Clone, Default)]
pub struct CardPopoverPresentation {
    config: PopoverConfig,
    animator: TransitionAnimator,
}

impl CardPopoverPresentation {
    /// Default configuration entering from `source`.
    pub fn new(source: Option<SourceDirection>) -> Self {
        Self::with_config_unchecked(PopoverConfig::default().source_direction(source))
    }

    /// Validate `config` and build from it.
    pub fn from_config(config: PopoverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config_unchecked(config))
    }

    fn with_config_unchecked(config: PopoverConfig) -> Self {
        let animator = TransitionAnimator::new(config.source_direction, config.transition_duration);
        Self { config, animator }
    }

    pub fn config(&self) -> &PopoverConfig {
        &self.config
    }

    pub fn source_direction(&self) -> Option<SourceDirection> {
        self.config.source_direction
    }

    /// Change the entrance edge. A transition already running keeps the
    /// direction it started with.
    pub fn set_source_direction(&mut self, source: Option<SourceDirection>) {
        self.config.source_direction = source;
    }

    pub fn transition_duration(&self) -> Duration {
        self.config.transition_duration
    }

    /// Change the transition duration. Zero is ignored.
    pub fn set_transition_duration(&mut self, duration: Duration) {
        if duration.is_zero() {
            cardpop_core::warn!(
                target: "cardpop::presentation",
                "ignoring zero transition duration"
            );
            return;
        }
        self.config.transition_duration = duration;
    }

    fn configured(&mut self, phase: TransitionPhase) -> &mut TransitionAnimator {
        self.animator.configure(
            phase,
            self.config.source_direction,
            self.config.transition_duration,
        );
        &mut self.animator
    }
}

impl TransitioningDelegate for CardPopoverPresentation {
    type Controller = PresentationController;
    type Animator = TransitionAnimator;

    fn presentation_controller(&mut self) -> PresentationController {
        PresentationController::new(&self.config)
    }

    fn animator_for_presenting(&mut self) -> &mut TransitionAnimator {
        self.configured(TransitionPhase::Presenting)
    }

    fn animator_for_dismissing(&mut self) -> &mut TransitionAnimator {
        self.configured(TransitionPhase::Dismissing)
    }

    fn active_animator(&mut self) -> &mut TransitionAnimator {
        &mut self.animator
    }
}
