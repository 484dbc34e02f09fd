#![forbid(unsafe_code)]

//! CardPop public facade crate.
//!
//! Re-exports the types a host integration needs from the internal crates,
//! adds the unified [`Error`] model and, with the `serde` feature, JSON
//! configuration loading.

#[cfg(feature = "serde")]
pub mod config;
pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use cardpop_core::animation::{AnimatorSlot, PropertyAnimator, TimingCurve};
pub use cardpop_core::geometry::{Insets, Point, Rect, Size, Translation};

// --- Presentation re-exports -----------------------------------------------

pub use cardpop_presentation::{
    AffordanceButton, AnimatedTransitioning, ButtonId, ButtonRole, CardPopoverPresentation,
    CardSurface, ChromeAppearance, ChromeLayers, ChromePhase, ConfigError, ContainerView,
    CrossFade, FrameProvider, PopoverConfig, PresentationAction, PresentationController,
    PresentationHooks, PresentedContent, SourceDirection, TransitionAnimator, TransitionContext,
    TransitionCoordinator, TransitionOutcome, TransitioningDelegate, VisualState,
};

// --- Errors ---------------------------------------------------------------

pub use error::{DegradationAction, Error, LoadError, Result};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnimatedTransitioning, CardPopoverPresentation, ContainerView, Error, Insets,
        PopoverConfig, PresentationAction, PresentationHooks, PresentedContent, Rect, Result,
        Size, SourceDirection, TransitionContext, TransitionCoordinator, TransitionOutcome,
        TransitioningDelegate,
    };

    pub use crate::{core, presentation};
}

pub use cardpop_core as core;
pub use cardpop_presentation as presentation;
