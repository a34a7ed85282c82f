//! Property invariants for resize classification and snapshot ratios.

use berth_layout::{ResizeStrategy, Size, select};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// The classifier is total over finite sizes (degenerate ones included)
    /// and never returns the extensibility-only tags.
    #[test]
    fn selector_is_total_and_never_defers(
        old_w in 0.0f32..4000.0,
        old_h in 0.0f32..4000.0,
        new_w in 0.0f32..4000.0,
        new_h in 0.0f32..4000.0,
    ) {
        let got = select(Size::new(old_w, old_h), Size::new(new_w, new_h));
        prop_assert_ne!(got, ResizeStrategy::None);
        prop_assert_ne!(got, ResizeStrategy::DeferComplex);
    }

    /// Uniform scaling always takes the cheap path, at any positive scale.
    #[test]
    fn uniform_scale_is_always_fixed_aspect(
        w in 1.0f32..2000.0,
        h in 1.0f32..2000.0,
        scale in 0.1f32..8.0,
    ) {
        let old = Size::new(w, h);
        let new = Size::new(w * scale, h * scale);
        prop_assert_eq!(select(old, new), ResizeStrategy::FixedAspect);
    }
}
