//! Property-based invariant tests for the card frame fitter.
//!
//! 1. With room for the insets, the card ends up inside the safe area
//! 2. A smaller preference is honored exactly; a larger one is ignored
//! 3. Dimensions never go negative, whatever the input
//! 4. Obstructions only ever shrink the card
//! 5. The fit is deterministic

use cardpop_core::geometry::{Insets, Rect};
use cardpop_presentation::fitter::{Obstruction, SizePreference, fit, fit_detailed};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn container_strategy() -> impl Strategy<Value = Rect> {
    (100.0f64..2000.0, 100.0f64..2000.0).prop_map(|(w, h)| Rect::new(0.0, 0.0, w, h))
}

/// Safe area nested inside the container, leaving at least 2×insets.
fn safe_area_strategy(container: Rect, insets: Insets) -> impl Strategy<Value = Rect> {
    let slack_x = (container.width - insets.width * 2.0).max(0.0);
    let slack_y = (container.height - insets.height * 2.0).max(0.0);
    (0.0..=0.2f64, 0.0..=0.2f64, 0.0..=0.2f64, 0.0..=0.2f64).prop_map(
        move |(left, top, right, bottom)| {
            let l = left * slack_x;
            let t = top * slack_y;
            let r = right * slack_x;
            let b = bottom * slack_y;
            Rect::new(l, t, container.width - l - r, container.height - t - b)
        },
    )
}

fn insets_strategy() -> impl Strategy<Value = Insets> {
    (0.0f64..40.0, 0.0f64..60.0).prop_map(|(w, h)| Insets::new(w, h))
}

fn scene_strategy() -> impl Strategy<Value = (Rect, Rect, Insets)> {
    (container_strategy(), insets_strategy()).prop_flat_map(|(container, insets)| {
        safe_area_strategy(container, insets).prop_map(move |safe| (container, safe, insets))
    })
}

fn contained(outer: &Rect, inner: &Rect) -> bool {
    const EPS: f64 = 1e-6;
    inner.min_x() >= outer.min_x() - EPS
        && inner.min_y() >= outer.min_y() - EPS
        && inner.max_x() <= outer.max_x() + EPS
        && inner.max_y() <= outer.max_y() + EPS
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn fitted_card_stays_in_safe_area((container, safe, insets) in scene_strategy()) {
        let outcome = fit_detailed(container, safe, SizePreference::NONE, insets, &[]);
        prop_assert!(outcome.converged);
        prop_assert!(contained(&safe, &outcome.rect), "{:?} not in {:?}", outcome.rect, safe);
    }

    #[test]
    fn smaller_preference_is_exact(
        container in container_strategy(),
        fraction in 0.05f64..0.95,
    ) {
        let insets = Insets::new(14.0, 44.0);
        let candidate_w = container.width - 28.0;
        let candidate_h = container.height - 88.0;
        prop_assume!(candidate_w > 0.0 && candidate_h > 0.0);

        let pref = SizePreference::new(candidate_w * fraction, candidate_h * fraction);
        let rect = fit(container, container, pref, insets, &[]);
        prop_assert!((rect.width - pref.width).abs() < 1e-9);
        prop_assert!((rect.height - pref.height).abs() < 1e-9);
    }

    #[test]
    fn larger_preference_is_ignored(
        container in container_strategy(),
        extra in 1.0f64..500.0,
    ) {
        let insets = Insets::new(14.0, 44.0);
        let unconstrained = fit(container, container, SizePreference::NONE, insets, &[]);
        let pref = SizePreference::new(unconstrained.width + extra, unconstrained.height + extra);
        prop_assert_eq!(fit(container, container, pref, insets, &[]), unconstrained);
    }

    #[test]
    fn dimensions_never_negative(
        w in -100.0f64..500.0,
        h in -100.0f64..500.0,
        sx in -50.0f64..300.0,
        sy in -50.0f64..300.0,
        sw in 0.0f64..300.0,
        sh in 0.0f64..300.0,
        inset in 0.0f64..200.0,
    ) {
        let outcome = fit_detailed(
            Rect::new(0.0, 0.0, w, h),
            Rect::new(sx, sy, sw, sh),
            SizePreference::NONE,
            Insets::all(inset),
            &[],
        );
        prop_assert!(outcome.rect.width >= 0.0);
        prop_assert!(outcome.rect.height >= 0.0);
    }

    #[test]
    fn obstructions_only_shrink(
        (container, safe, insets) in scene_strategy(),
        y in 0.0f64..2000.0,
        height in 0.0f64..200.0,
        margin in 0.0f64..40.0,
    ) {
        let free = fit(container, safe, SizePreference::NONE, insets, &[]);
        let strip = Obstruction::vertical(Rect::new(0.0, y, container.width, height), margin);
        let blocked = fit(container, safe, SizePreference::NONE, insets, &[strip]);
        prop_assert_eq!(blocked.origin(), free.origin());
        prop_assert_eq!(blocked.width, free.width);
        prop_assert!(blocked.height <= free.height);
    }

    #[test]
    fn fit_is_deterministic((container, safe, insets) in scene_strategy()) {
        let a = fit(container, safe, SizePreference::new(250.0, 0.0), insets, &[]);
        let b = fit(container, safe, SizePreference::new(250.0, 0.0), insets, &[]);
        prop_assert_eq!(a, b);
    }
}
