#![forbid(unsafe_code)]

//! Presentation configuration.
//!
//! [`PopoverConfig`] gathers every knob of a card popover. Build it with the
//! chained setters, check it with [`PopoverConfig::validate`], and hand it to
//! [`CardPopoverPresentation::from_config`](crate::presentation::CardPopoverPresentation::from_config).
//!
//! With the `serde` feature the config (de)serializes with durations as
//! seconds; missing fields take their defaults:
//!
//! ```json
//! { "source_direction": "left", "transition_duration": 0.38, "dismiss_label": "Close" }
//! ```

use std::time::Duration;

use cardpop_core::geometry::Insets;

use crate::animator::DEFAULT_TRANSITION_DURATION;
use crate::direction::SourceDirection;
use crate::error::ConfigError;
use crate::fitter::DEFAULT_INSETS;

/// Default duration of the animated resize after a content size change.
pub const DEFAULT_FRAME_UPDATE_DURATION: Duration = Duration::from_millis(340);

/// Configuration for a card popover.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopoverConfig {
    /// Edge the card enters from; `None` fades in place.
    pub source_direction: Option<SourceDirection>,
    /// Duration of the present and dismiss transitions.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub transition_duration: Duration,
    /// Inset between the container edges and the card.
    pub content_insets: Insets,
    /// Title of the dismiss button; `None` or empty hides it.
    pub dismiss_label: Option<String>,
    /// Blur the backdrop (the card itself goes opaque).
    pub prefers_blurred_background: bool,
    /// Dim the presenting content.
    pub prefers_dimmed_presenting_view: bool,
    /// Duration of the animated resize after a content size change.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub frame_update_duration: Duration,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            source_direction: None,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            content_insets: DEFAULT_INSETS,
            dismiss_label: None,
            prefers_blurred_background: true,
            prefers_dimmed_presenting_view: true,
            frame_update_duration: DEFAULT_FRAME_UPDATE_DURATION,
        }
    }
}

impl PopoverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source direction.
    #[must_use]
    pub fn source_direction(mut self, direction: Option<SourceDirection>) -> Self {
        self.source_direction = direction;
        self
    }

    /// Set the transition duration.
    #[must_use]
    pub fn transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    /// Set the content insets.
    #[must_use]
    pub fn content_insets(mut self, insets: impl Into<Insets>) -> Self {
        self.content_insets = insets.into();
        self
    }

    /// Set the dismiss button title.
    #[must_use]
    pub fn dismiss_label(mut self, label: impl Into<String>) -> Self {
        self.dismiss_label = Some(label.into());
        self
    }

    /// Set whether the backdrop is blurred.
    #[must_use]
    pub fn prefers_blurred_background(mut self, blurred: bool) -> Self {
        self.prefers_blurred_background = blurred;
        self
    }

    /// Set whether the presenting content is dimmed.
    #[must_use]
    pub fn prefers_dimmed_presenting_view(mut self, dimmed: bool) -> Self {
        self.prefers_dimmed_presenting_view = dimmed;
        self
    }

    /// Set the resize animation duration.
    #[must_use]
    pub fn frame_update_duration(mut self, duration: Duration) -> Self {
        self.frame_update_duration = duration;
        self
    }

    /// Dismiss label, with empty treated as absent.
    pub fn effective_dismiss_label(&self) -> Option<&str> {
        self.dismiss_label.as_deref().filter(|l| !l.is_empty())
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transition_duration.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "transition_duration",
            });
        }
        if self.frame_update_duration.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "frame_update_duration",
            });
        }
        let Insets { width, height } = self.content_insets;
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(ConfigError::InvalidInsets { width, height });
        }
        Ok(())
    }
}

/// (De)serialize a [`Duration`] as fractional seconds.
#[cfg(feature = "serde")]
mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
