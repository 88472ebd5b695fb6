use std::collections::HashMap;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::value_axis::{AxisPosition, DEFAULT_AXIS_ID, ValueAxis};
use crate::error::{ChartError, ChartResult};

/// Fallback right inset when no axis is visible, matching the default axis width.
const FALLBACK_RIGHT_INSET: f64 = 60.0;

/// Owns the value axes of a pane and the series-to-axis bindings.
///
/// Axes keep creation order. Every series resolves to exactly one axis;
/// unbound series fall back to the default axis, which always exists.
#[derive(Debug, Clone)]
pub struct AxisRegistry {
    axes: IndexMap<String, ValueAxis>,
    series_to_axis: HashMap<String, String>,
}

impl Default for AxisRegistry {
    fn default() -> Self {
        let mut axes = IndexMap::new();
        axes.insert(
            DEFAULT_AXIS_ID.to_owned(),
            ValueAxis::new(DEFAULT_AXIS_ID, AxisPosition::Right),
        );
        Self {
            axes,
            series_to_axis: HashMap::new(),
        }
    }
}

impl AxisRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new axis; a duplicate id is a configuration error.
    pub fn create_axis(
        &mut self,
        id: impl Into<String>,
        position: AxisPosition,
    ) -> ChartResult<&mut ValueAxis> {
        let id = id.into();
        if self.axes.contains_key(&id) {
            return Err(ChartError::DuplicateAxis(id));
        }
        let axis = ValueAxis::new(id.clone(), position);
        Ok(self.axes.entry(id).or_insert(axis))
    }

    pub fn axis(&self, id: &str) -> ChartResult<&ValueAxis> {
        self.axes
            .get(id)
            .ok_or_else(|| ChartError::UnknownAxis(id.to_owned()))
    }

    pub fn axis_mut(&mut self, id: &str) -> ChartResult<&mut ValueAxis> {
        self.axes
            .get_mut(id)
            .ok_or_else(|| ChartError::UnknownAxis(id.to_owned()))
    }

    #[must_use]
    pub fn contains_axis(&self, id: &str) -> bool {
        self.axes.contains_key(id)
    }

    #[must_use]
    pub fn default_axis(&self) -> &ValueAxis {
        &self.axes[DEFAULT_AXIS_ID]
    }

    #[must_use]
    pub fn default_axis_mut(&mut self) -> &mut ValueAxis {
        &mut self.axes[DEFAULT_AXIS_ID]
    }

    /// All axes in creation order.
    pub fn axes(&self) -> impl Iterator<Item = &ValueAxis> {
        self.axes.values()
    }

    pub fn axes_mut(&mut self) -> impl Iterator<Item = &mut ValueAxis> {
        self.axes.values_mut()
    }

    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    #[must_use]
    pub fn visible_axes_at(&self, position: AxisPosition) -> SmallVec<[&ValueAxis; 4]> {
        self.axes
            .values()
            .filter(|axis| axis.is_visible() && axis.position() == position)
            .collect()
    }

    /// Removes an axis.
    ///
    /// The default axis cannot be removed, and neither can an axis that is
    /// still referenced by series bindings.
    pub fn remove_axis(&mut self, id: &str) -> ChartResult<()> {
        if id == DEFAULT_AXIS_ID {
            return Err(ChartError::DefaultAxisRemoval(id.to_owned()));
        }
        if !self.axes.contains_key(id) {
            return Err(ChartError::UnknownAxis(id.to_owned()));
        }
        if self.series_to_axis.values().any(|axis_id| axis_id == id) {
            return Err(ChartError::AxisInUse(id.to_owned()));
        }
        self.axes.shift_remove(id);
        Ok(())
    }

    /// Binds a series to an axis; the axis must already exist.
    pub fn bind_series(
        &mut self,
        series_id: impl Into<String>,
        axis_id: impl Into<String>,
    ) -> ChartResult<()> {
        let axis_id = axis_id.into();
        if !self.axes.contains_key(&axis_id) {
            return Err(ChartError::UnknownAxis(axis_id));
        }
        self.series_to_axis.insert(series_id.into(), axis_id);
        Ok(())
    }

    pub fn unbind_series(&mut self, series_id: &str) {
        self.series_to_axis.remove(series_id);
    }

    /// Axis id a series resolves to; unbound series use the default axis.
    #[must_use]
    pub fn axis_id_for_series<'a>(&'a self, series_id: &str) -> &'a str {
        self.series_to_axis
            .get(series_id)
            .map(String::as_str)
            .unwrap_or(DEFAULT_AXIS_ID)
    }

    #[must_use]
    pub fn resolve_axis(&self, series_id: &str) -> &ValueAxis {
        let axis_id = self.axis_id_for_series(series_id);
        // A binding can only reference an existing axis and the default
        // axis always exists, so the lookup cannot miss.
        &self.axes[axis_id]
    }

    /// Whether `series_id` resolves to `axis_id`, explicitly or by default.
    #[must_use]
    pub fn series_resolves_to(&self, series_id: &str, axis_id: &str) -> bool {
        self.axis_id_for_series(series_id) == axis_id
    }

    /// Pixel insets implied by the visible axes: summed widths per side,
    /// with a fallback right inset when nothing is visible.
    #[must_use]
    pub fn derive_insets(&self) -> (f64, f64) {
        let mut left = 0.0;
        let mut right = 0.0;
        for axis in self.axes.values() {
            if !axis.is_visible() {
                continue;
            }
            match axis.position() {
                AxisPosition::Left => left += axis.width_px(),
                AxisPosition::Right => right += axis.width_px(),
            }
        }
        if left == 0.0 && right == 0.0 {
            right = FALLBACK_RIGHT_INSET;
        }
        (left, right)
    }
}
