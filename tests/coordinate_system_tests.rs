use chartx::core::{
    AxisScale, CoordinateSystem, Insets, LogScale, VerticalAnchor, Viewport, DEFAULT_AXIS_ID,
};
use chartx::ChartError;

fn bare_coords(width: u32, height: u32) -> CoordinateSystem {
    let mut viewport = Viewport::new(width, height);
    viewport.set_insets(Insets::new(0.0, 0.0, 0.0, 0.0));
    CoordinateSystem::new(viewport)
}

#[test]
fn linear_value_maps_to_pixel_from_the_top() {
    let mut coords = bare_coords(800, 500);
    coords
        .set_axis_range(DEFAULT_AXIS_ID, 0.0, 100.0)
        .expect("valid range");

    let px = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 50.0)
        .expect("to pixel");
    assert!((px - 250.0).abs() <= 1e-9);

    let bottom = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 0.0)
        .expect("to pixel");
    let top = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 100.0)
        .expect("to pixel");
    assert!((bottom - 500.0).abs() <= 1e-9);
    assert!(top.abs() <= 1e-9);
}

#[test]
fn range_change_invalidates_the_cached_transform() {
    let mut coords = bare_coords(800, 500);
    coords
        .set_axis_range(DEFAULT_AXIS_ID, 0.0, 100.0)
        .expect("valid range");
    let before = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 50.0)
        .expect("to pixel");
    assert!((before - 250.0).abs() <= 1e-9);

    coords
        .set_axis_range(DEFAULT_AXIS_ID, 0.0, 200.0)
        .expect("valid range");
    let after = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 50.0)
        .expect("to pixel");
    assert!((after - 375.0).abs() <= 1e-9);
}

#[test]
fn resize_invalidates_the_cached_transform() {
    let mut coords = bare_coords(800, 500);
    coords
        .set_axis_range(DEFAULT_AXIS_ID, 0.0, 200.0)
        .expect("valid range");
    coords
        .value_to_pixel(DEFAULT_AXIS_ID, 50.0)
        .expect("warm cache");

    coords.set_size(800, 1000);
    let px = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 50.0)
        .expect("to pixel");
    assert!((px - 750.0).abs() <= 1e-9);
}

#[test]
fn x_mapping_round_trips_through_the_visible_window() {
    let mut coords = bare_coords(800, 500);
    coords.set_time_range(0, 1_000).expect("valid range");

    assert!(coords.x_to_pixel(0).abs() <= 1e-9);
    assert!((coords.x_to_pixel(1_000) - 800.0).abs() <= 1e-9);
    assert!((coords.x_to_pixel(500) - 400.0).abs() <= 1e-9);
    assert_eq!(coords.pixel_to_x(400.0), 500);
    assert!((coords.pixel_width(250) - 200.0).abs() <= 1e-9);
}

#[test]
fn left_inset_offsets_the_x_origin() {
    let mut viewport = Viewport::new(900, 500);
    viewport.set_insets(Insets::new(50.0, 0.0, 0.0, 0.0));
    let mut coords = CoordinateSystem::new(viewport);
    coords.set_time_range(0, 1_000).expect("valid range");

    assert!((coords.x_to_pixel(0) - 50.0).abs() <= 1e-9);
    assert!((coords.x_to_pixel(1_000) - 900.0).abs() <= 1e-9);
}

#[test]
fn pan_invalidates_the_x_transform() {
    let mut coords = bare_coords(800, 500);
    coords.set_time_range(0, 1_000).expect("valid range");
    coords.x_to_pixel(0);

    coords.pan(80.0);
    assert_eq!(coords.viewport().time_range(), (-100, 900));
    assert!((coords.x_to_pixel(0) - 80.0).abs() <= 1e-9);
}

#[test]
fn zoom_preserves_the_anchor_pixel() {
    let mut coords = bare_coords(800, 500);
    coords.set_time_range(0, 1_000).expect("valid range");
    coords.x_to_pixel(0);

    coords.zoom(2.0, 400.0);
    assert_eq!(coords.viewport().time_range(), (250, 750));
    assert!((coords.x_to_pixel(500) - 400.0).abs() <= 1e-9);
}

#[test]
fn zoom_to_fit_pads_the_data_extent() {
    let mut coords = bare_coords(800, 500);
    coords.zoom_to_fit(0, 1_000).expect("valid extent");
    assert_eq!(coords.viewport().time_range(), (-20, 1_020));
}

#[test]
fn degenerate_window_maps_to_the_window_start() {
    let mut coords = bare_coords(800, 500);
    coords.set_time_range(5, 5).expect("valid range");

    assert!(coords.x_to_pixel(5).abs() <= 1e-9);
    assert_eq!(coords.pixel_to_x(123.0), 5);
}

#[test]
fn unknown_axis_is_a_loud_error() {
    let mut coords = bare_coords(800, 500);
    let result = coords.value_to_pixel("ghost", 1.0);
    assert!(matches!(result, Err(ChartError::UnknownAxis(_))));
}

#[test]
fn log_axis_takes_the_non_linear_path() {
    let mut coords = bare_coords(800, 500);
    coords
        .set_axis_scale(DEFAULT_AXIS_ID, AxisScale::Log(LogScale::base10()))
        .expect("set scale");
    coords
        .set_axis_range(DEFAULT_AXIS_ID, 1.0, 100.0)
        .expect("valid range");

    let px = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 10.0)
        .expect("to pixel");
    assert!((px - 250.0).abs() <= 1e-9);
    assert!(
        (coords
            .value_to_pixel(DEFAULT_AXIS_ID, 1.0)
            .expect("to pixel")
            - 500.0)
            .abs()
            <= 1e-9
    );

    let recovered = coords
        .pixel_to_value(DEFAULT_AXIS_ID, 250.0)
        .expect("from pixel");
    assert!((recovered - 10.0).abs() <= 1e-9);
}

#[test]
fn scale_swap_invalidates_the_cached_transform() {
    let mut coords = bare_coords(800, 500);
    coords
        .set_axis_range(DEFAULT_AXIS_ID, 1.0, 100.0)
        .expect("valid range");
    let linear_px = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 10.0)
        .expect("to pixel");

    coords
        .set_axis_scale(DEFAULT_AXIS_ID, AxisScale::Log(LogScale::base10()))
        .expect("set scale");
    let log_px = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 10.0)
        .expect("to pixel");

    assert!((log_px - 250.0).abs() <= 1e-9);
    assert!((linear_px - log_px).abs() > 1.0);
}

#[test]
fn bottom_anchored_axis_occupies_its_sub_panel() {
    let mut coords = bare_coords(800, 400);
    coords
        .create_axis("volume", chartx::core::AxisPosition::Right)
        .expect("create axis");
    coords
        .set_axis_layout("volume", VerticalAnchor::Bottom, 0.25)
        .expect("set layout");
    coords
        .set_axis_range("volume", 0.0, 10.0)
        .expect("valid range");

    assert!(
        (coords.value_to_pixel("volume", 0.0).expect("to pixel") - 400.0).abs() <= 1e-9
    );
    assert!(
        (coords.value_to_pixel("volume", 10.0).expect("to pixel") - 300.0).abs() <= 1e-9
    );
    assert!(
        (coords.value_to_pixel("volume", 5.0).expect("to pixel") - 350.0).abs() <= 1e-9
    );
}

#[test]
fn layout_change_invalidates_the_cached_transform() {
    let mut coords = bare_coords(800, 400);
    coords
        .set_axis_range(DEFAULT_AXIS_ID, 0.0, 100.0)
        .expect("valid range");
    let full = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 50.0)
        .expect("to pixel");
    assert!((full - 200.0).abs() <= 1e-9);

    coords
        .set_axis_layout(DEFAULT_AXIS_ID, VerticalAnchor::Top, 0.5)
        .expect("set layout");
    let halved = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 50.0)
        .expect("to pixel");
    assert!((halved - 100.0).abs() <= 1e-9);
}

#[test]
fn batch_projection_matches_scalar_projection() {
    let mut coords = bare_coords(800, 500);
    coords
        .set_axis_scale(DEFAULT_AXIS_ID, AxisScale::Log(LogScale::base10()))
        .expect("set scale");
    coords
        .set_axis_range(DEFAULT_AXIS_ID, 1.0, 1_000.0)
        .expect("valid range");

    let values = [1.0, 10.0, 100.0, 1_000.0];
    let mut pixels = [0.0; 4];
    coords
        .values_to_pixels(DEFAULT_AXIS_ID, &values, &mut pixels)
        .expect("batch projection");

    for (value, pixel) in values.iter().zip(pixels) {
        let scalar = coords
            .value_to_pixel(DEFAULT_AXIS_ID, *value)
            .expect("to pixel");
        assert!((scalar - pixel).abs() <= 1e-9);
    }
}

#[test]
fn batch_projection_rejects_short_pixel_buffers() {
    let mut coords = bare_coords(800, 500);
    let values = [1.0, 2.0, 3.0];
    let mut pixels = [0.0; 2];
    let result = coords.values_to_pixels(DEFAULT_AXIS_ID, &values, &mut pixels);
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}

#[test]
fn pixel_height_scales_a_value_span() {
    let mut coords = bare_coords(800, 500);
    coords
        .set_axis_range(DEFAULT_AXIS_ID, 0.0, 100.0)
        .expect("valid range");
    let height = coords
        .pixel_height(DEFAULT_AXIS_ID, 10.0)
        .expect("pixel height");
    assert!((height - 50.0).abs() <= 1e-9);
}

#[test]
fn flat_range_collapses_to_the_panel_bottom() {
    let mut coords = bare_coords(800, 500);
    coords
        .set_axis_range(DEFAULT_AXIS_ID, 5.0, 5.0)
        .expect("flat range is allowed for linear axes");

    let px = coords
        .value_to_pixel(DEFAULT_AXIS_ID, 5.0)
        .expect("to pixel");
    assert!((px - 500.0).abs() <= 1e-9);
    let value = coords
        .pixel_to_value(DEFAULT_AXIS_ID, 123.0)
        .expect("from pixel");
    assert_eq!(value, 5.0);
}

#[test]
fn axis_visibility_and_width_drive_the_insets() {
    let mut coords = CoordinateSystem::new(Viewport::new(800, 600));

    coords
        .set_axis_width(DEFAULT_AXIS_ID, 80.0)
        .expect("set width");
    let insets = coords.viewport().insets();
    assert_eq!((insets.left, insets.right), (0.0, 80.0));
    assert_eq!((insets.top, insets.bottom), (10.0, 30.0));

    coords
        .create_axis("volume", chartx::core::AxisPosition::Left)
        .expect("create axis");
    coords.set_axis_width("volume", 50.0).expect("set width");
    let insets = coords.viewport().insets();
    assert_eq!((insets.left, insets.right), (50.0, 80.0));

    coords
        .set_axis_visible(DEFAULT_AXIS_ID, false)
        .expect("hide axis");
    let insets = coords.viewport().insets();
    assert_eq!((insets.left, insets.right), (50.0, 0.0));

    // With no visible axis at all the fallback gutter applies.
    coords.set_axis_visible("volume", false).expect("hide axis");
    let insets = coords.viewport().insets();
    assert_eq!((insets.left, insets.right), (0.0, 60.0));
}
