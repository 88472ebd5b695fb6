use serde::{Deserialize, Serialize};

use crate::core::scale::AxisScale;
use crate::error::{ChartError, ChartResult};

/// Well-known id of the axis every unbound series resolves to.
pub const DEFAULT_AXIS_ID: &str = "default";

/// Horizontal placement of a value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisPosition {
    Left,
    #[default]
    Right,
}

/// Auto-range behavior of a value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AutoRangeMode {
    /// Range is only ever set explicitly.
    Never,
    /// Auto-range applies once per armed cycle, then freezes.
    Once,
    /// Auto-range recomputes on every engine pass.
    #[default]
    Always,
}

/// Vertical anchor of the axis sub-region inside the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VerticalAnchor {
    /// Use the full chart height.
    #[default]
    Full,
    /// Occupy `height_ratio` of the pane, anchored to the top.
    Top,
    /// Occupy `height_ratio` of the pane, anchored to the bottom.
    Bottom,
}

/// A vertical axis owning a value range, a scale strategy and layout state.
///
/// Multiple series can share one axis; multiple axes can stack inside one
/// pane via `height_ratio` and `anchor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAxis {
    id: String,
    position: AxisPosition,
    min_value: f64,
    max_value: f64,
    auto_range: AutoRangeMode,
    auto_range_applied: bool,
    visible: bool,
    width_px: f64,
    grow_by: f64,
    height_ratio: f64,
    anchor: VerticalAnchor,
    scale: AxisScale,
}

impl ValueAxis {
    pub(crate) fn new(id: impl Into<String>, position: AxisPosition) -> Self {
        Self {
            id: id.into(),
            position,
            min_value: 0.0,
            max_value: 1.0,
            auto_range: AutoRangeMode::Always,
            auto_range_applied: false,
            visible: true,
            width_px: 60.0,
            grow_by: 0.05,
            height_ratio: 1.0,
            anchor: VerticalAnchor::Full,
            scale: AxisScale::Linear,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn position(&self) -> AxisPosition {
        self.position
    }

    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn value_span(&self) -> f64 {
        self.max_value - self.min_value
    }

    #[must_use]
    pub fn visible_range(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    /// Padding fraction added on each end during auto-ranging.
    #[must_use]
    pub fn grow_by(&self) -> f64 {
        self.grow_by
    }

    #[must_use]
    pub fn height_ratio(&self) -> f64 {
        self.height_ratio
    }

    #[must_use]
    pub fn anchor(&self) -> VerticalAnchor {
        self.anchor
    }

    #[must_use]
    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    #[must_use]
    pub fn auto_range(&self) -> AutoRangeMode {
        self.auto_range
    }

    pub fn set_position(&mut self, position: AxisPosition) {
        self.position = position;
    }

    /// Commits a new visible range after validating it against the scale.
    ///
    /// On rejection the axis keeps its previous range (no partial update).
    pub fn set_visible_range(&mut self, min_value: f64, max_value: f64) -> ChartResult<()> {
        if max_value < min_value || !self.scale.is_valid_range(min_value, max_value) {
            return Err(ChartError::InvalidRange {
                axis_id: self.id.clone(),
                scale: self.scale.name(),
                min: min_value,
                max: max_value,
            });
        }
        self.min_value = min_value;
        self.max_value = max_value;
        Ok(())
    }

    /// Switches the auto-range mode; switching to `Once` arms a new cycle.
    pub fn set_auto_range(&mut self, mode: AutoRangeMode) {
        self.auto_range = mode;
        if mode == AutoRangeMode::Once {
            self.auto_range_applied = false;
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_width_px(&mut self, width_px: f64) {
        self.width_px = width_px.max(0.0);
    }

    pub fn set_grow_by(&mut self, fraction: f64) {
        self.grow_by = fraction.max(0.0);
    }

    pub fn set_height_ratio(&mut self, ratio: f64) {
        self.height_ratio = ratio.clamp(0.0, 1.0);
    }

    pub fn set_anchor(&mut self, anchor: VerticalAnchor) {
        self.anchor = anchor;
    }

    /// Swaps the scale strategy.
    ///
    /// The current range is kept as-is; callers that swap to a stricter
    /// scale (e.g. log) should follow up with a validated range change.
    pub fn set_scale(&mut self, scale: AxisScale) {
        self.scale = scale;
    }

    /// Whether the auto-range engine should touch this axis right now.
    #[must_use]
    pub fn should_auto_range(&self) -> bool {
        match self.auto_range {
            AutoRangeMode::Never => false,
            AutoRangeMode::Once => !self.auto_range_applied,
            AutoRangeMode::Always => true,
        }
    }

    /// Settles the current `Once` cycle.
    pub fn mark_auto_range_applied(&mut self) {
        self.auto_range_applied = true;
    }

    /// Re-arms the `Once` cycle.
    pub fn reset_auto_range(&mut self) {
        self.auto_range_applied = false;
    }

    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        self.scale.normalize(value, self.min_value, self.max_value)
    }

    #[must_use]
    pub fn interpolate(&self, normalized: f64) -> f64 {
        self.scale
            .interpolate(normalized, self.min_value, self.max_value)
    }

    #[must_use]
    pub fn grid_levels(&self, target_count: usize) -> Vec<f64> {
        self.scale
            .grid_levels(self.min_value, self.max_value, target_count)
    }

    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        self.scale.format_value(value)
    }

    /// Expands the range symmetrically by a fraction of the current span.
    pub fn expand_by_fraction(&mut self, fraction: f64) {
        let expansion = self.value_span() * fraction;
        self.min_value -= expansion;
        self.max_value += expansion;
    }
}
