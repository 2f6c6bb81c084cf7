use approx::assert_abs_diff_eq;
use vizij_tween_core::Ease;

#[test]
/// it should map 0 to 0 and 1 to 1 for every curve
fn endpoints() {
    for ease in Ease::ALL {
        assert_abs_diff_eq!(ease.apply(0.0), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(ease.apply(1.0), 1.0, epsilon = 1e-4);
    }
}

#[test]
/// it should cap non-overshooting curves at 1 and stay finite for out-of-range input
fn bounded_and_finite() {
    for ease in Ease::ALL {
        for i in -20..=40 {
            let t = i as f32 / 20.0;
            let v = ease.apply(t);
            assert!(v.is_finite(), "{ease:?}({t}) = {v}");
            if !ease.overshoots() && (0.0..=1.0).contains(&t) {
                assert!(v <= 1.0, "{ease:?}({t}) = {v}");
            }
        }
    }
}

#[test]
/// it should overshoot with back and elastic curves somewhere inside the unit interval
fn overshooting_curves_leave_the_unit_range() {
    for ease in [Ease::BackOut, Ease::ElasticOut, Ease::Spring] {
        let peak = (0..=100)
            .map(|i| ease.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "{ease:?} peak {peak}");
    }
}

#[test]
/// it should keep in/out pairs symmetric about the midpoint
fn in_out_symmetry() {
    for (ease_in, ease_out) in [
        (Ease::QuadIn, Ease::QuadOut),
        (Ease::CubicIn, Ease::CubicOut),
        (Ease::SineIn, Ease::SineOut),
        (Ease::CircIn, Ease::CircOut),
    ] {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert_abs_diff_eq!(ease_in.apply(t), 1.0 - ease_out.apply(1.0 - t), epsilon = 1e-5);
        }
    }
}
