#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Card popover presentation for CardPop.
//!
//! A card popover slides (or fades) a content card in from a chosen edge,
//! over a blurred and dimmed backdrop, with an optional strip of buttons
//! under it. This crate holds everything that decides where the card goes
//! and how it moves; the host toolkit supplies the views and the display
//! loop through the traits in [`host`].
//!
//! # Pieces
//! - [`fitter`]: the pure frame-fitting function.
//! - [`direction`]: source edge to entrance offset and opacity.
//! - [`animator`]: the spring-driven present/dismiss state machine.
//! - [`controller`]: chrome ownership, layout and resize handling.
//! - [`presentation`]: the delegate apps configure and hold.
//! - [`surface`], [`backdrop`], [`affordance`]: the visual pieces.
//! - [`config`], [`error`]: configuration and its validation.

pub mod affordance;
pub mod animator;
pub mod backdrop;
pub mod config;
pub mod controller;
pub mod direction;
pub mod error;
pub mod fitter;
pub mod host;
pub mod presentation;
pub mod surface;

pub use affordance::{AffordanceButton, ButtonId, ButtonRole, DismissAffordance};
pub use animator::{TransitionAnimator, TransitionOutcome, TransitionPhase};
pub use backdrop::{Backdrop, BackdropAppearance};
pub use config::PopoverConfig;
pub use controller::{ChromePhase, PresentationAction, PresentationController};
pub use direction::SourceDirection;
pub use error::ConfigError;
pub use fitter::{Obstruction, SizePreference, fit};
pub use host::{
    AnimatedTransitioning, ChromeAppearance, ChromeLayers, ContainerView, CrossFade,
    FrameProvider, PresentationHooks, PresentedContent, TransitionContext,
    TransitionCoordinator, TransitioningDelegate,
};
pub use presentation::CardPopoverPresentation;
pub use surface::{CardSurface, Material, VisualState};
