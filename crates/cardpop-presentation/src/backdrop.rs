#![forbid(unsafe_code)]

//! Backdrop behind the card: a blur effect and a dimming layer.
//!
//! The host renders the blur; here it is just an intensity in [0, 1] so
//! the cross-fade into and out of the presentation can interpolate it.

use cardpop_core::animation::Interpolate;

/// Opacity of the dimming layer when dimming is preferred.
pub const DIMMING_ALPHA: f64 = 0.3;

/// Blur style requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlurStyle {
    #[default]
    Prominent,
}

/// How strongly the backdrop covers the presenting content.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackdropAppearance {
    /// Blur effect intensity; 0 is no effect.
    pub blur: f64,
    /// Dimming layer opacity.
    pub dimming: f64,
}

impl BackdropAppearance {
    /// Nothing drawn.
    pub const HIDDEN: Self = Self::new(0.0, 0.0);

    pub const fn new(blur: f64, dimming: f64) -> Self {
        Self { blur, dimming }
    }

    /// Appearance for the given preferences.
    pub fn for_preferences(blurred: bool, dimmed: bool) -> Self {
        Self::new(
            if blurred { 1.0 } else { 0.0 },
            if dimmed { DIMMING_ALPHA } else { 0.0 },
        )
    }

    /// Whether the blur effect is on.
    pub fn is_blurred(&self) -> bool {
        self.blur > 0.0
    }

    /// Whether anything is drawn.
    pub fn is_visible(&self) -> bool {
        self.blur > 0.0 || self.dimming > 0.0
    }
}

impl Default for BackdropAppearance {
    fn default() -> Self {
        Self::HIDDEN
    }
}

impl Interpolate for BackdropAppearance {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self::new(
            self.blur.interpolate(&to.blur, t).clamp(0.0, 1.0),
            self.dimming.interpolate(&to.dimming, t).clamp(0.0, 1.0),
        )
    }
}

/// Backdrop model owned by the presentation controller.
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    style: BlurStyle,
    appearance: BackdropAppearance,
}

impl Backdrop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self) -> BlurStyle {
        self.style
    }

    pub fn appearance(&self) -> BackdropAppearance {
        self.appearance
    }

    pub fn set_appearance(&mut self, appearance: BackdropAppearance) {
        self.appearance = appearance;
    }
}
