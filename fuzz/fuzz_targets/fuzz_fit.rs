#![no_main]

use arbitrary::Arbitrary;
use cardpop::presentation::fitter::{Obstruction, SizePreference, fit_detailed};
use cardpop::{Insets, Rect};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    width: u16,
    height: u16,
    safe: [u16; 4],
    preferred: (u16, u16),
    insets: (u8, u8),
    strip: Option<([u16; 4], u8)>,
}

fuzz_target!(|input: Input| {
    // Whole points keep the arithmetic exact; the fitter works in f64.
    let container = Rect::new(0.0, 0.0, f64::from(input.width), f64::from(input.height));
    let [sx, sy, sw, sh] = input.safe.map(f64::from);
    let safe = Rect::new(sx, sy, sw, sh);
    let (pw, ph) = input.preferred;
    let preference = SizePreference::new(f64::from(pw), f64::from(ph));
    let insets = Insets::new(f64::from(input.insets.0), f64::from(input.insets.1));
    let obstructions: Vec<Obstruction> = input
        .strip
        .map(|(r, margin)| {
            let [x, y, w, h] = r.map(f64::from);
            Obstruction::vertical(Rect::new(x, y, w, h), f64::from(margin))
        })
        .into_iter()
        .collect();

    let outcome = fit_detailed(container, safe, preference, insets, &obstructions);
    let rect = outcome.rect;
    assert!(rect.width >= 0.0, "negative width: {rect:?}");
    assert!(rect.height >= 0.0, "negative height: {rect:?}");
    assert!(rect.x.is_finite() && rect.y.is_finite(), "non-finite origin: {rect:?}");

    // Obstructions never grow the card.
    let bare = fit_detailed(container, safe, preference, insets, &[]).rect;
    assert!(rect.height <= bare.height, "obstruction grew the card");
    assert!(rect.width <= bare.width, "obstruction grew the card");
});
