use chartx::core::{HorizontalAxis, HorizontalPosition, TimeAxis};
use chartx::ChartError;

#[test]
fn normalization_is_linear_in_time() {
    let mut axis = TimeAxis::default();
    axis.set_visible_range(1_000, 2_000).expect("valid range");

    assert!((axis.to_normalized(1_000)).abs() <= 1e-12);
    assert!((axis.to_normalized(1_500) - 0.5).abs() <= 1e-12);
    assert!((axis.to_normalized(2_000) - 1.0).abs() <= 1e-12);
}

#[test]
fn zero_duration_maps_to_neutral_midpoint() {
    let mut axis = TimeAxis::default();
    axis.set_visible_range(500, 500).expect("valid range");
    assert_eq!(axis.to_normalized(500), 0.5);
    assert_eq!(axis.to_normalized(9_999), 0.5);
}

#[test]
fn inverted_range_is_rejected() {
    let mut axis = TimeAxis::default();
    let result = axis.set_visible_range(2_000, 1_000);
    assert!(matches!(result, Err(ChartError::InvalidRange { .. })));
    assert_eq!(axis.visible_range(), (0, 1));
}

#[test]
fn default_axis_sits_at_the_bottom() {
    let axis = TimeAxis::default();
    assert_eq!(axis.id(), "time");
    assert_eq!(axis.position(), HorizontalPosition::Bottom);
    assert!(axis.is_time_based());
    assert!(axis.is_visible());
}
