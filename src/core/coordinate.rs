use std::collections::HashMap;

use crate::core::registry::AxisRegistry;
use crate::core::scale::AxisScale;
use crate::core::value_axis::{AutoRangeMode, AxisPosition, ValueAxis, VerticalAnchor};
use crate::core::viewport::{Insets, Viewport};
use crate::error::{ChartError, ChartResult};

/// Cached X pixel transform shared by all axes.
#[derive(Debug, Clone, Copy)]
struct XTransform {
    scale: f64,
    offset: f64,
}

/// Cached Y pixel transform for one value axis.
///
/// The snapshot embeds the axis range and scale it was built from; every
/// range, scale, and geometry mutation below must invalidate it eagerly.
#[derive(Debug, Clone, Copy)]
struct AxisTransform {
    y_scale: f64,
    y_offset: f64,
    effective_top: f64,
    effective_height: f64,
    min_value: f64,
    max_value: f64,
    scale: AxisScale,
    linear_fast_path: bool,
}

/// Composes the viewport and the axis registry into cached value-to-pixel
/// transforms.
///
/// The coordinate system owns both collaborators so that every mutation
/// flows through an invalidating setter; there is no way to move an axis
/// range or resize the viewport without the cache being dropped first.
/// Queries rebuild lazily.
#[derive(Debug, Clone, Default)]
pub struct CoordinateSystem {
    viewport: Viewport,
    axes: AxisRegistry,
    x_cache: Option<XTransform>,
    y_cache: HashMap<String, AxisTransform>,
}

impl CoordinateSystem {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            axes: AxisRegistry::new(),
            x_cache: None,
            y_cache: HashMap::new(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn axes(&self) -> &AxisRegistry {
        &self.axes
    }

    pub fn axis(&self, axis_id: &str) -> ChartResult<&ValueAxis> {
        self.axes.axis(axis_id)
    }

    // ---- mutation: every path below invalidates before returning ----

    pub fn set_time_range(&mut self, start_time: i64, end_time: i64) -> ChartResult<()> {
        self.viewport.set_time_range(start_time, end_time)?;
        self.x_cache = None;
        Ok(())
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.viewport.set_size(width, height);
        self.invalidate_cache();
    }

    pub fn set_insets(&mut self, insets: Insets) {
        self.viewport.set_insets(insets);
        self.invalidate_cache();
    }

    /// Recomputes left/right insets from the visible axes, keeping the
    /// current top/bottom insets.
    pub fn sync_insets_from_axes(&mut self) {
        let (left, right) = self.axes.derive_insets();
        let current = self.viewport.insets();
        self.viewport
            .set_insets(Insets::new(left, right, current.top, current.bottom));
        self.invalidate_cache();
    }

    pub fn pan(&mut self, delta_x_px: f64) {
        self.viewport.pan(delta_x_px);
        self.x_cache = None;
    }

    pub fn zoom(&mut self, factor: f64, anchor_x_px: f64) {
        self.viewport.zoom(factor, anchor_x_px);
        self.x_cache = None;
    }

    pub fn zoom_to_fit(&mut self, min_x: i64, max_x: i64) -> ChartResult<()> {
        self.viewport.zoom_to_fit(min_x, max_x)?;
        self.x_cache = None;
        Ok(())
    }

    pub fn create_axis(
        &mut self,
        axis_id: impl Into<String>,
        position: AxisPosition,
    ) -> ChartResult<()> {
        self.axes.create_axis(axis_id, position).map(|_| ())
    }

    pub fn remove_axis(&mut self, axis_id: &str) -> ChartResult<()> {
        self.axes.remove_axis(axis_id)?;
        self.y_cache.remove(axis_id);
        Ok(())
    }

    pub fn bind_series(
        &mut self,
        series_id: impl Into<String>,
        axis_id: impl Into<String>,
    ) -> ChartResult<()> {
        self.axes.bind_series(series_id, axis_id)
    }

    pub fn unbind_series(&mut self, series_id: &str) {
        self.axes.unbind_series(series_id);
    }

    /// Commits a validated range to an axis and drops its cached transform.
    pub fn set_axis_range(&mut self, axis_id: &str, min: f64, max: f64) -> ChartResult<()> {
        self.axes.axis_mut(axis_id)?.set_visible_range(min, max)?;
        self.y_cache.remove(axis_id);
        Ok(())
    }

    /// Swaps an axis scale strategy and drops its cached transform.
    pub fn set_axis_scale(&mut self, axis_id: &str, scale: AxisScale) -> ChartResult<()> {
        self.axes.axis_mut(axis_id)?.set_scale(scale);
        self.y_cache.remove(axis_id);
        Ok(())
    }

    /// Repositions an axis inside the pane (stacked sub-panels) and drops
    /// its cached transform.
    pub fn set_axis_layout(
        &mut self,
        axis_id: &str,
        anchor: VerticalAnchor,
        height_ratio: f64,
    ) -> ChartResult<()> {
        let axis = self.axes.axis_mut(axis_id)?;
        axis.set_anchor(anchor);
        axis.set_height_ratio(height_ratio);
        self.y_cache.remove(axis_id);
        Ok(())
    }

    /// Shows or hides an axis and recomputes the derived insets.
    pub fn set_axis_visible(&mut self, axis_id: &str, visible: bool) -> ChartResult<()> {
        self.axes.axis_mut(axis_id)?.set_visible(visible);
        self.sync_insets_from_axes();
        Ok(())
    }

    /// Changes the label gutter width of an axis and recomputes insets.
    pub fn set_axis_width(&mut self, axis_id: &str, width_px: f64) -> ChartResult<()> {
        self.axes.axis_mut(axis_id)?.set_width_px(width_px);
        self.sync_insets_from_axes();
        Ok(())
    }

    pub fn set_auto_range_mode(&mut self, axis_id: &str, mode: AutoRangeMode) -> ChartResult<()> {
        self.axes.axis_mut(axis_id)?.set_auto_range(mode);
        Ok(())
    }

    pub fn reset_auto_range(&mut self, axis_id: &str) -> ChartResult<()> {
        self.axes.axis_mut(axis_id)?.reset_auto_range();
        Ok(())
    }

    pub fn mark_auto_range_applied(&mut self, axis_id: &str) -> ChartResult<()> {
        self.axes.axis_mut(axis_id)?.mark_auto_range_applied();
        Ok(())
    }

    /// Drops every cached transform.
    pub fn invalidate_cache(&mut self) {
        self.x_cache = None;
        self.y_cache.clear();
    }

    pub fn invalidate_axis_cache(&mut self, axis_id: &str) {
        self.y_cache.remove(axis_id);
    }

    // ---- queries ----

    /// Maps an X domain value (timestamp or index) to a pixel X.
    pub fn x_to_pixel(&mut self, x: i64) -> f64 {
        let transform = self.ensure_x_transform();
        x as f64 * transform.scale + transform.offset
    }

    /// Maps a pixel X back to an X domain value.
    pub fn pixel_to_x(&mut self, pixel: f64) -> i64 {
        let transform = self.ensure_x_transform();
        if transform.scale == 0.0 {
            return self.viewport.start_time();
        }
        ((pixel - transform.offset) / transform.scale) as i64
    }

    /// Pixel width of an X domain span.
    pub fn pixel_width(&mut self, x_span: i64) -> f64 {
        let transform = self.ensure_x_transform();
        x_span as f64 * transform.scale
    }

    /// Maps a value to a pixel Y on the given axis.
    ///
    /// An unknown axis id is a configuration error and fails loudly.
    pub fn value_to_pixel(&mut self, axis_id: &str, value: f64) -> ChartResult<f64> {
        let transform = self.ensure_axis_transform(axis_id)?;
        Ok(value_to_pixel(transform, value))
    }

    /// Maps a pixel Y on the given axis back to a value.
    pub fn pixel_to_value(&mut self, axis_id: &str, pixel: f64) -> ChartResult<f64> {
        let transform = self.ensure_axis_transform(axis_id)?;

        if transform.linear_fast_path {
            if transform.y_scale == 0.0 {
                return Ok(transform.min_value);
            }
            return Ok((transform.y_offset - pixel) / transform.y_scale);
        }

        if transform.effective_height == 0.0 {
            return Ok(transform.min_value);
        }
        let normalized = 1.0 - (pixel - transform.effective_top) / transform.effective_height;
        Ok(transform
            .scale
            .interpolate(normalized, transform.min_value, transform.max_value))
    }

    /// Batch Y mapping for rendering large series without per-point lookups.
    pub fn values_to_pixels(
        &mut self,
        axis_id: &str,
        values: &[f64],
        pixels: &mut [f64],
    ) -> ChartResult<()> {
        if pixels.len() < values.len() {
            return Err(ChartError::InvalidData(format!(
                "pixel buffer of {} cannot hold {} values",
                pixels.len(),
                values.len()
            )));
        }

        let transform = self.ensure_axis_transform(axis_id)?;
        if transform.linear_fast_path {
            for (value, pixel) in values.iter().zip(pixels.iter_mut()) {
                *pixel = transform.y_offset - value * transform.y_scale;
            }
        } else {
            for (value, pixel) in values.iter().zip(pixels.iter_mut()) {
                let normalized =
                    transform
                        .scale
                        .normalize(*value, transform.min_value, transform.max_value);
                *pixel =
                    transform.effective_top + transform.effective_height * (1.0 - normalized);
            }
        }
        Ok(())
    }

    /// Pixel height of a value span on the given axis.
    ///
    /// For non-linear scales this is an approximation over the full range.
    pub fn pixel_height(&mut self, axis_id: &str, y_span: f64) -> ChartResult<f64> {
        let transform = self.ensure_axis_transform(axis_id)?;
        if transform.linear_fast_path {
            return Ok(y_span * transform.y_scale);
        }
        let value_span = transform.max_value - transform.min_value;
        if value_span == 0.0 {
            return Ok(0.0);
        }
        Ok((y_span / value_span) * transform.effective_height)
    }

    fn ensure_x_transform(&mut self) -> XTransform {
        if let Some(transform) = self.x_cache {
            return transform;
        }

        let duration = self.viewport.visible_duration();
        let scale = if duration > 0 {
            self.viewport.chart_width() / duration as f64
        } else {
            0.0
        };
        let offset = self.viewport.insets().left - self.viewport.start_time() as f64 * scale;

        let transform = XTransform { scale, offset };
        self.x_cache = Some(transform);
        transform
    }

    fn ensure_axis_transform(&mut self, axis_id: &str) -> ChartResult<AxisTransform> {
        if let Some(transform) = self.y_cache.get(axis_id) {
            return Ok(*transform);
        }

        let axis = self.axes.axis(axis_id)?;
        let transform = build_axis_transform(&self.viewport, axis);
        self.y_cache.insert(axis_id.to_owned(), transform);
        Ok(transform)
    }
}

fn build_axis_transform(viewport: &Viewport, axis: &ValueAxis) -> AxisTransform {
    let chart_height = viewport.chart_height();
    let top_inset = viewport.insets().top;

    let (effective_height, effective_top) = match axis.anchor() {
        VerticalAnchor::Full => (chart_height, top_inset),
        VerticalAnchor::Top => (chart_height * axis.height_ratio(), top_inset),
        VerticalAnchor::Bottom => {
            let height = chart_height * axis.height_ratio();
            (height, top_inset + chart_height - height)
        }
    };

    let value_span = axis.value_span();
    let y_scale = if value_span > 0.0 {
        effective_height / value_span
    } else {
        0.0
    };
    // Y grows downward: pixel = offset - value * scale.
    let y_offset = effective_top + effective_height + axis.min_value() * y_scale;

    AxisTransform {
        y_scale,
        y_offset,
        effective_top,
        effective_height,
        min_value: axis.min_value(),
        max_value: axis.max_value(),
        scale: axis.scale(),
        linear_fast_path: matches!(axis.scale(), AxisScale::Linear),
    }
}

fn value_to_pixel(transform: AxisTransform, value: f64) -> f64 {
    if transform.linear_fast_path {
        transform.y_offset - value * transform.y_scale
    } else {
        let normalized = transform
            .scale
            .normalize(value, transform.min_value, transform.max_value);
        transform.effective_top + transform.effective_height * (1.0 - normalized)
    }
}
