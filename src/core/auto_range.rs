use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::coordinate::CoordinateSystem;
use crate::core::series::SeriesValues;
use crate::error::ChartResult;

/// Derives value-axis ranges from the on-screen slice of the series bound
/// to each axis, windowed by the viewport's visible time span.
///
/// The engine runs once per repaint cycle. Degenerate input (no bound
/// series, empty data, flat or NaN extremes) leaves the axis untouched;
/// only validation failures of an explicit caller-supplied range surface as
/// errors, never anything on this per-frame path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AutoRangeEngine;

impl AutoRangeEngine {
    /// Runs auto-ranging for every axis that currently wants it.
    ///
    /// `series` pairs each series id with its data. Returns the number of
    /// axes whose range was updated.
    pub fn run(self, coords: &mut CoordinateSystem, series: &[(&str, &dyn SeriesValues)]) -> usize {
        let axis_ids: SmallVec<[String; 4]> = coords
            .axes()
            .axes()
            .filter(|axis| axis.should_auto_range())
            .map(|axis| axis.id().to_owned())
            .collect();

        let mut updated = 0;
        for axis_id in &axis_ids {
            match self.run_for_axis(coords, axis_id, series) {
                Ok(true) => updated += 1,
                Ok(false) => {}
                Err(error) => {
                    // A range the bound data cannot satisfy (e.g. log axis
                    // over non-positive values) degrades to a skipped frame.
                    warn!(axis_id, error = %error, "auto-range skipped");
                }
            }
        }
        updated
    }

    /// Auto-ranges a single axis from its bound series.
    ///
    /// Returns `Ok(true)` when the axis range was mutated.
    pub fn run_for_axis(
        self,
        coords: &mut CoordinateSystem,
        axis_id: &str,
        series: &[(&str, &dyn SeriesValues)],
    ) -> ChartResult<bool> {
        let bound: SmallVec<[&dyn SeriesValues; 4]> = series
            .iter()
            .filter(|(series_id, _)| coords.axes().series_resolves_to(series_id, axis_id))
            .map(|(_, values)| *values)
            .collect();

        // Off-screen history must not feed the range, so each series is
        // windowed to the visible time span. The shortest bound series
        // additionally caps the window: mixed series lengths range over the
        // shared prefix of the on-screen slice, which the tests pin down.
        let Some(shared_last) = bound
            .iter()
            .filter(|values| !values.is_empty())
            .map(|values| values.len() - 1)
            .min()
        else {
            return Ok(false);
        };
        let (start_time, end_time) = coords.viewport().time_range();

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for values in &bound {
            let Some(first) = values.index_at_or_after(start_time) else {
                continue;
            };
            let Some(last) = values.index_at_or_before(end_time) else {
                continue;
            };
            let last = last.min(shared_last);
            if first > last {
                continue;
            }
            if let Some((series_min, series_max)) = values.value_bounds(first, last) {
                min = min.min(series_min);
                max = max.max(series_max);
            }
        }

        if min.is_nan() || max.is_nan() || min >= max {
            return Ok(false);
        }

        let padding = (max - min) * coords.axis(axis_id)?.grow_by();
        let padded_min = min - padding;
        let padded_max = max + padding;

        coords.set_axis_range(axis_id, padded_min, padded_max)?;
        coords.mark_auto_range_applied(axis_id)?;
        debug!(axis_id, min = padded_min, max = padded_max, "auto-range applied");
        Ok(true)
    }
}
