#![forbid(unsafe_code)]

//! Card frame fitting.
//!
//! [`fit`] computes where the presented card sits inside its container:
//!
//! 1. Start from the container size shrunk by the insets on each side.
//! 2. Clamp each axis down to the content's size preference when that
//!    preference is non-zero and smaller. Preferences never grow the card.
//! 3. Center in the container, but never start before the safe-area origin
//!    plus the inset on that axis.
//! 4. While the card pokes out of the safe area, take the first offending
//!    edge in the order top, left, bottom, right. Slide the card back in by
//!    the overflow if that alone makes it fit, otherwise shrink it by the
//!    overflow along that edge's axis.
//! 5. Deduct every obstruction (expanded by its margin) that still overlaps
//!    the card, along the obstruction's axis.
//!
//! # Invariants
//!
//! 1. If the container is at least twice the insets on each axis and the
//!    safe area lies within the container, the result lies within the safe
//!    area.
//! 2. Width and height are never negative.
//! 3. The correction loop runs at most [`MAX_CORRECTION_PASSES`] times.
//!
//! # Failure Modes
//!
//! - Container smaller than twice the insets: dimensions floor at zero
//!   instead of going negative.
//! - Non-finite input: the correction budget runs out and the last
//!   candidate is returned with [`FitOutcome::converged`] unset.

use cardpop_core::geometry::{Axis, Edges, Insets, Point, Rect, Size};

/// Default inset between the container edges and the card.
pub const DEFAULT_INSETS: Insets = Insets::new(14.0, 44.0);

/// Upper bound on containment correction passes.
pub const MAX_CORRECTION_PASSES: usize = 64;

/// Size hint from the presented content. A zero component means "no
/// preference on that axis".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizePreference {
    pub width: f64,
    pub height: f64,
}

impl SizePreference {
    /// No preference on either axis.
    pub const NONE: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Preferred extent along `axis`, if any.
    #[inline]
    pub fn along(&self, axis: Axis) -> Option<f64> {
        let value = match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        };
        (value != 0.0).then_some(value)
    }

    /// Whether neither axis carries a preference.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

impl From<Size> for SizePreference {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

/// A region the card must not overlap, such as the dismiss button strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstruction {
    /// The obstructing rectangle, in container coordinates.
    pub rect: Rect,
    /// How far the rectangle is grown along `axis` before testing overlap.
    pub margin: f64,
    /// Axis along which an overlap is deducted from the card.
    pub axis: Axis,
}

impl Obstruction {
    pub const fn new(rect: Rect, margin: f64, axis: Axis) -> Self {
        Self { rect, margin, axis }
    }

    /// An obstruction that takes height away from the card.
    pub const fn vertical(rect: Rect, margin: f64) -> Self {
        Self::new(rect, margin, Axis::Vertical)
    }

    /// The rectangle grown by `margin` on both sides of `axis`.
    pub fn expanded(&self) -> Rect {
        match self.axis {
            Axis::Horizontal => self.rect.inset_by(-self.margin, 0.0),
            Axis::Vertical => self.rect.inset_by(0.0, -self.margin),
        }
    }
}

/// Result of [`fit_detailed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOutcome {
    /// The fitted card frame.
    pub rect: Rect,
    /// Containment correction passes taken.
    pub passes: usize,
    /// Whether the card ended up inside the safe area before obstruction
    /// deductions.
    pub converged: bool,
}

/// Compute the card frame.
///
/// `container` supplies the size the card is centered in; centering is
/// relative to the container's own coordinate space, so its origin is
/// ignored. `safe_area` is in the same space.
pub fn fit(
    container: Rect,
    safe_area: Rect,
    preference: SizePreference,
    insets: Insets,
    obstructions: &[Obstruction],
) -> Rect {
    fit_detailed(container, safe_area, preference, insets, obstructions).rect
}

/// [`fit`], also reporting how the correction loop went.
pub fn fit_detailed(
    container: Rect,
    safe_area: Rect,
    preference: SizePreference,
    insets: Insets,
    obstructions: &[Obstruction],
) -> FitOutcome {
    let size = preferred_size(container.size(), preference, insets);
    let origin = Point::new(
        ((container.width - size.width) / 2.0).max(safe_area.min_x() + insets.width),
        ((container.height - size.height) / 2.0).max(safe_area.min_y() + insets.height),
    );
    let mut frame = Rect::from_origin_size(origin, size);

    let (passes, converged) = contain(&mut frame, &safe_area);
    if !converged {
        cardpop_core::warn!(
            target: "cardpop::fit",
            passes,
            width = frame.width,
            height = frame.height,
            "card frame did not fit the safe area within the correction budget"
        );
    }

    for obstruction in obstructions {
        if let Some(overlap) = frame.intersection_opt(&obstruction.expanded()) {
            match obstruction.axis {
                Axis::Horizontal => frame.width = (frame.width - overlap.width).max(0.0),
                Axis::Vertical => frame.height = (frame.height - overlap.height).max(0.0),
            }
        }
    }

    cardpop_core::trace!(
        target: "cardpop::fit",
        x = frame.x,
        y = frame.y,
        width = frame.width,
        height = frame.height,
        passes,
        "fitted card frame"
    );

    FitOutcome {
        rect: frame,
        passes,
        converged,
    }
}

/// Container size minus insets, clamped down to the preference.
fn preferred_size(container: Size, preference: SizePreference, insets: Insets) -> Size {
    let mut size = Size::new(
        (container.width - insets.width * 2.0).max(0.0),
        (container.height - insets.height * 2.0).max(0.0),
    );
    if let Some(width) = preference.along(Axis::Horizontal)
        && width < size.width
    {
        size.width = width.max(0.0);
    }
    if let Some(height) = preference.along(Axis::Vertical)
        && height < size.height
    {
        size.height = height.max(0.0);
    }
    size
}

/// Slide or shrink `frame` until it lies inside `safe`. Returns the passes
/// taken and whether it fits.
fn contain(frame: &mut Rect, safe: &Rect) -> (usize, bool) {
    let mut passes = 0;
    while !safe.contains_rect(frame) {
        if passes == MAX_CORRECTION_PASSES {
            return (passes, false);
        }
        passes += 1;

        let overflow = safe.overflowing_edges(frame);
        if overflow.contains(Edges::TOP) {
            let inset = safe.min_y() - frame.min_y();
            let moved = frame.offset_by(0.0, inset);
            if safe.contains_rect(&moved) {
                *frame = moved;
            } else {
                frame.height = (frame.height - inset).max(0.0);
            }
        } else if overflow.contains(Edges::LEFT) {
            let inset = safe.min_x() - frame.min_x();
            let moved = frame.offset_by(inset, 0.0);
            if safe.contains_rect(&moved) {
                *frame = moved;
            } else {
                frame.width = (frame.width - inset).max(0.0);
            }
        } else if overflow.contains(Edges::BOTTOM) {
            let overshoot = frame.max_y() - safe.max_y();
            let moved = frame.offset_by(0.0, -overshoot);
            if safe.contains_rect(&moved) {
                *frame = moved;
            } else {
                frame.height = (frame.height - overshoot).max(0.0);
            }
        } else if overflow.contains(Edges::RIGHT) {
            let overshoot = frame.max_x() - safe.max_x();
            let moved = frame.offset_by(-overshoot, 0.0);
            if safe.contains_rect(&moved) {
                *frame = moved;
            } else {
                frame.width = (frame.width - overshoot).max(0.0);
            }
        } else {
            // Not contained yet no edge overflows: NaN somewhere.
            return (passes, false);
        }
    }
    (passes, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: Rect = Rect::new(0.0, 0.0, 400.0, 800.0);

    #[test]
    fn default_insets_center_the_card() {
        let rect = fit(PHONE, PHONE, SizePreference::NONE, DEFAULT_INSETS, &[]);
        assert_eq!(rect, Rect::new(14.0, 44.0, 372.0, 712.0));
    }

    #[test]
    fn width_preference_recenters() {
        let rect = fit(
            PHONE,
            PHONE,
            SizePreference::new(300.0, 0.0),
            DEFAULT_INSETS,
            &[],
        );
        assert_eq!(rect, Rect::new(50.0, 44.0, 300.0, 712.0));
    }

    #[test]
    fn larger_preference_is_ignored() {
        let rect = fit(
            PHONE,
            PHONE,
            SizePreference::new(1000.0, 2000.0),
            DEFAULT_INSETS,
            &[],
        );
        assert_eq!(rect, Rect::new(14.0, 44.0, 372.0, 712.0));
    }

    #[test]
    fn each_axis_clamps_on_its_own() {
        let both = SizePreference::new(300.0, 400.0);
        let rect = fit(PHONE, PHONE, both, DEFAULT_INSETS, &[]);
        assert_eq!(rect, Rect::new(50.0, 200.0, 300.0, 400.0));

        // Only the smaller axis takes the preference.
        let mixed = SizePreference::new(1000.0, 400.0);
        let rect = fit(PHONE, PHONE, mixed, DEFAULT_INSETS, &[]);
        assert_eq!(rect, Rect::new(14.0, 200.0, 372.0, 400.0));
    }

    #[test]
    fn height_preference_centers_vertically() {
        let rect = fit(
            PHONE,
            PHONE,
            SizePreference::new(0.0, 200.0),
            DEFAULT_INSETS,
            &[],
        );
        assert_eq!(rect, Rect::new(14.0, 300.0, 372.0, 200.0));
    }

    #[test]
    fn obstruction_over_bottom_deducts_height() {
        let strip = Rect::new(0.0, 716.0, 400.0, 40.0);
        let rect = fit(
            PHONE,
            PHONE,
            SizePreference::NONE,
            DEFAULT_INSETS,
            &[Obstruction::vertical(strip, 0.0)],
        );
        assert_eq!(rect, Rect::new(14.0, 44.0, 372.0, 672.0));
    }

    #[test]
    fn obstruction_margin_expands_vertically() {
        // Button 44 tall sitting 24 above the bottom; margin 24 reaches the
        // bottom edge and 24 above the button.
        let button = Rect::new(150.0, 732.0, 100.0, 44.0);
        let rect = fit(
            PHONE,
            PHONE,
            SizePreference::NONE,
            DEFAULT_INSETS,
            &[Obstruction::vertical(button, 24.0)],
        );
        // Expanded button spans y 708..800; card bottom is 756.
        assert_eq!(rect.height, 712.0 - 48.0);
    }

    #[test]
    fn horizontal_obstruction_deducts_width() {
        let rail = Rect::new(380.0, 0.0, 20.0, 800.0);
        let rect = fit(
            PHONE,
            PHONE,
            SizePreference::NONE,
            DEFAULT_INSETS,
            &[Obstruction::new(rail, 0.0, Axis::Horizontal)],
        );
        assert_eq!(rect.width, 372.0 - 6.0);
    }

    #[test]
    fn non_overlapping_obstruction_is_ignored() {
        let rect = fit(
            PHONE,
            PHONE,
            SizePreference::NONE,
            DEFAULT_INSETS,
            &[Obstruction::vertical(Rect::new(0.0, 0.0, 400.0, 10.0), 4.0)],
        );
        assert_eq!(rect, Rect::new(14.0, 44.0, 372.0, 712.0));
    }

    #[test]
    fn notch_pushes_card_down() {
        // Safe area starts at 60; origin clamps to 60 + 44 and the card is
        // shrunk at the bottom to stay inside.
        let safe = Rect::new(0.0, 60.0, 400.0, 706.0);
        let outcome = fit_detailed(PHONE, safe, SizePreference::NONE, DEFAULT_INSETS, &[]);
        assert!(outcome.converged);
        assert!(safe.contains_rect(&outcome.rect));
        assert_eq!(outcome.rect.y, 104.0);
        assert_eq!(outcome.rect.max_y(), safe.max_y());
    }

    #[test]
    fn card_taller_than_safe_area_shrinks() {
        let safe = Rect::new(0.0, 100.0, 400.0, 300.0);
        let outcome = fit_detailed(PHONE, safe, SizePreference::NONE, DEFAULT_INSETS, &[]);
        assert!(outcome.converged);
        assert!(safe.contains_rect(&outcome.rect));
        assert!(outcome.passes > 0);
    }

    #[test]
    fn short_preference_translates_up_instead_of_shrinking() {
        let safe = Rect::new(0.0, 0.0, 400.0, 300.0);
        let rect = fit(
            PHONE,
            safe,
            SizePreference::new(0.0, 100.0),
            DEFAULT_INSETS,
            &[],
        );
        // Centered at y=350 overflows the bottom; sliding up fits.
        assert_eq!(rect.height, 100.0);
        assert_eq!(rect.max_y(), 300.0);
    }

    #[test]
    fn landscape_safe_area_insets_on_the_left() {
        let container = Rect::new(0.0, 0.0, 800.0, 400.0);
        let safe = Rect::new(44.0, 0.0, 712.0, 379.0);
        let rect = fit(container, safe, SizePreference::NONE, DEFAULT_INSETS, &[]);
        assert!(safe.contains_rect(&rect));
        assert_eq!(rect.x, 58.0);
    }

    #[test]
    fn tiny_container_floors_at_zero() {
        let tiny = Rect::new(0.0, 0.0, 20.0, 50.0);
        let outcome = fit_detailed(tiny, tiny, SizePreference::NONE, DEFAULT_INSETS, &[]);
        assert!(outcome.rect.width >= 0.0);
        assert!(outcome.rect.height >= 0.0);
        assert!(outcome.passes <= MAX_CORRECTION_PASSES);
    }

    #[test]
    fn nan_input_exhausts_budget_without_hanging() {
        let bad = Rect::new(0.0, 0.0, f64::NAN, 800.0);
        let outcome = fit_detailed(PHONE, bad, SizePreference::NONE, DEFAULT_INSETS, &[]);
        assert!(!outcome.converged);
        assert!(outcome.passes <= MAX_CORRECTION_PASSES);
    }

    #[test]
    fn size_preference_helpers() {
        assert!(SizePreference::NONE.is_none());
        let pref = SizePreference::from(Size::new(0.0, 12.0));
        assert_eq!(pref.along(Axis::Horizontal), None);
        assert_eq!(pref.along(Axis::Vertical), Some(12.0));
    }
}
