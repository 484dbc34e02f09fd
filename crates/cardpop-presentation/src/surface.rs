#![forbid(unsafe_code)]

//! The presented card's wrapper surface.
//!
//! A [`CardSurface`] stands in for the view that hosts the presented
//! content: it carries the frame the fitter computed, the transient
//! [`VisualState`] the transition animates, and the static chrome (rounded
//! corners, soft shadow, blurred or opaque material).

use cardpop_core::animation::Interpolate;
use cardpop_core::geometry::{Point, Rect, Translation};

/// Corner radius of the card.
pub const CORNER_RADIUS: f64 = 10.0;

/// How far the card's shadow extends past its frame.
pub const SHADOW_RADIUS: f64 = 6.0;

/// Background material of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Material {
    /// Solid system background.
    #[default]
    Opaque,
    /// Translucent blur; content shows the backdrop through it.
    Blurred,
}

/// Transform and opacity applied on top of the card's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualState {
    pub translation: Translation,
    pub alpha: f64,
}

impl VisualState {
    /// Untransformed and fully visible.
    pub const IDENTITY: Self = Self::new(Translation::IDENTITY, 1.0);

    pub const fn new(translation: Translation, alpha: f64) -> Self {
        Self { translation, alpha }
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Interpolate for VisualState {
    /// Translation extrapolates with the spring; alpha is clamped to [0, 1].
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            translation: self.translation.lerp(&to.translation, t),
            alpha: self.alpha.interpolate(&to.alpha, t).clamp(0.0, 1.0),
        }
    }
}

/// Static decoration of the card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardChrome {
    pub corner_radius: f64,
    pub shadow_radius: f64,
    pub material: Material,
}

impl Default for CardChrome {
    fn default() -> Self {
        Self {
            corner_radius: CORNER_RADIUS,
            shadow_radius: SHADOW_RADIUS,
            material: Material::Opaque,
        }
    }
}

/// The wrapper surface hosting the presented content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardSurface {
    frame: Rect,
    visual: VisualState,
    chrome: CardChrome,
}

impl CardSurface {
    /// A surface with a zero frame, identity visual state and default chrome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an initial frame (builder pattern).
    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    /// Untransformed frame in container coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub fn visual(&self) -> VisualState {
        self.visual
    }

    pub fn set_visual(&mut self, visual: VisualState) {
        self.visual = visual;
    }

    pub fn chrome(&self) -> CardChrome {
        self.chrome
    }

    /// Where the card is drawn: the frame moved by the current translation.
    pub fn presented_frame(&self) -> Rect {
        self.visual.translation.apply(&self.frame)
    }

    /// Area covered by the card including its shadow.
    pub fn shadow_frame(&self) -> Rect {
        self.presented_frame().outset(self.chrome.shadow_radius)
    }

    /// Whether the card is blurred instead of opaque.
    pub fn prefers_blurred_background(&self) -> bool {
        self.chrome.material == Material::Blurred
    }

    /// Switch between the blurred and opaque material.
    pub fn set_prefers_blurred_background(&mut self, blurred: bool) {
        self.chrome.material = if blurred {
            Material::Blurred
        } else {
            Material::Opaque
        };
    }

    /// Whether the card receives taps at `point`.
    pub fn hit_test(&self, point: Point) -> bool {
        self.visual.alpha > 0.0 && self.presented_frame().contains_point(point)
    }
}
