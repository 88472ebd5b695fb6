use chartx::core::{AxisScale, LogScale, PercentageScale, MAX_GRID_LEVELS};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_round_trip_property(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        factor in 0.0f64..1.0
    ) {
        let max = min + span;
        let value = min + factor * span;

        let normalized = AxisScale::Linear.normalize(value, min, max);
        let recovered = AxisScale::Linear.interpolate(normalized, min, max);

        prop_assert!((recovered - value).abs() <= 1e-6);
    }

    #[test]
    fn log_round_trip_property(
        min in 0.001f64..1_000.0,
        ratio in 1.001f64..1_000_000.0,
        normalized in 0.0f64..1.0
    ) {
        let max = min * ratio;
        let scale = AxisScale::Log(LogScale::base10());

        let value = scale.interpolate(normalized, min, max);
        let recovered = scale.normalize(value, min, max);

        prop_assert!((recovered - normalized).abs() <= 1e-9);
    }

    #[test]
    fn linear_grid_levels_are_sorted_in_range_and_capped(
        min in -1_000.0f64..1_000.0,
        span in 0.1f64..1_000.0,
        target in 1usize..50
    ) {
        let max = min + span;
        let levels = AxisScale::Linear.grid_levels(min, max, target);

        prop_assert!(levels.len() <= MAX_GRID_LEVELS);
        for pair in levels.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        let slack = 1e-9 * span.max(1.0);
        for level in &levels {
            prop_assert!(*level >= min - slack);
            prop_assert!(*level <= max + slack);
        }
    }

    #[test]
    fn log_grid_levels_are_sorted_in_range_and_capped(
        min in 0.001f64..100.0,
        ratio in 1.5f64..1_000_000.0,
        target in 1usize..50
    ) {
        let max = min * ratio;
        let levels = AxisScale::Log(LogScale::base10()).grid_levels(min, max, target);

        prop_assert!(levels.len() <= MAX_GRID_LEVELS);
        for pair in levels.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for level in &levels {
            prop_assert!(*level >= min);
            prop_assert!(*level <= max);
        }
    }

    #[test]
    fn percentage_labels_carry_the_deviation_sign(
        reference in 1.0f64..10_000.0,
        deviation in -0.99f64..10.0
    ) {
        let scale = PercentageScale::new(reference).expect("valid reference");
        let value = reference * (1.0 + deviation);
        let label = AxisScale::Percentage(scale).format_value(value);

        if deviation > 1e-6 {
            prop_assert!(label.starts_with('+'));
        }
        if deviation < -1e-6 {
            prop_assert!(label.starts_with('-'));
        }
    }

    #[test]
    fn normalize_is_total_over_arbitrary_input(
        value in proptest::num::f64::ANY,
        min in proptest::num::f64::ANY,
        max in proptest::num::f64::ANY
    ) {
        for scale in [
            AxisScale::Linear,
            AxisScale::Log(LogScale::base10()),
        ] {
            let normalized = scale.normalize(value, min, max);
            prop_assert!(!normalized.is_nan());
        }
    }
}
