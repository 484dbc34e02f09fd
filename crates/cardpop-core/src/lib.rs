// Forbid unsafe in production; deny (with targeted allows) in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, animation primitives, and logging for CardPop.
//!
//! # Role in CardPop
//! `cardpop-core` is the leaf layer. It owns the value types the
//! presentation engine computes with and the tick-driven animation
//! primitives the transition animator is built from.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Rect`], [`geometry::Size`], [`geometry::Insets`],
//!   [`geometry::Translation`] in floating-point layout points.
//! - **Animation**: the [`animation::Animation`] trait, easing, a damped
//!   [`animation::spring::Spring`], and the interruptible
//!   [`animation::property::PropertyAnimator`] with its single-occupancy
//!   [`animation::slot::AnimatorSlot`].
//! - **Logging**: `tracing` re-exports behind the `tracing` feature, no-op
//!   macros otherwise.
//!
//! # How it fits in the system
//! `cardpop-presentation` consumes these types to fit the card frame and
//! drive present/dismiss transitions. Nothing here knows about a host
//! toolkit; all time flows in through explicit `tick(dt)` calls.

pub mod animation;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
