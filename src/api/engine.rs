use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AutoRangeEngine, AutoRangeMode, AxisPosition, AxisScale, CoordinateSystem,
    FollowLatestController, Insets, MemorySeries, Sample, SeriesValues, ValueAxis, Viewport,
    DEFAULT_AXIS_ID,
};
use crate::error::{ChartError, ChartResult};

use super::events::{DataEvent, DataEventQueue};

/// Realtime viewport-follow setup carried by [`ChartEngineConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowBehavior {
    pub enabled: bool,
    pub bar_duration: i64,
}

impl Default for FollowBehavior {
    fn default() -> Self {
        Self {
            enabled: false,
            bar_duration: 1,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist chart setup without
/// inventing their own format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_insets")]
    pub insets: Insets,
    pub time_start: i64,
    pub time_end: i64,
    #[serde(default)]
    pub follow: FollowBehavior,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            insets: default_insets(),
            time_start: 0,
            time_end: 1,
            follow: FollowBehavior::default(),
        }
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(width: u32, height: u32, time_start: i64, time_end: i64) -> Self {
        Self {
            width,
            height,
            time_start,
            time_end,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub fn with_follow(mut self, bar_duration: i64) -> Self {
        self.follow = FollowBehavior {
            enabled: true,
            bar_duration,
        };
        self
    }

    fn validate(&self) -> ChartResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if self.time_end < self.time_start {
            return Err(ChartError::InvalidData(format!(
                "time_end {} precedes time_start {}",
                self.time_end, self.time_start
            )));
        }
        if self.follow.bar_duration < 1 {
            return Err(ChartError::InvalidData(format!(
                "follow bar duration must be positive, got {}",
                self.follow.bar_duration
            )));
        }
        Ok(())
    }
}

fn default_insets() -> Insets {
    Viewport::default().insets()
}

/// What a [`ChartEngine::begin_frame`] pass actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameUpdate {
    /// Coalesced series events drained this frame.
    pub events_processed: usize,
    /// Whether the follow controller shifted the visible window.
    pub viewport_shifted: bool,
    /// Axes whose range was recomputed by auto-range.
    pub axes_auto_ranged: usize,
}

impl FrameUpdate {
    /// True when the frame changed any coordinate-affecting state.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.events_processed > 0 || self.viewport_shifted || self.axes_auto_ranged > 0
    }
}

/// Single-threaded frame driver tying series storage, the follow
/// controller, and auto-range to the coordinate system.
///
/// All mutations enqueue coalesced per-series events; [`Self::begin_frame`]
/// is the one synchronization point where those events are applied to axis
/// and viewport state, so coordinate queries between frames stay stable.
#[derive(Debug, Clone)]
pub struct ChartEngine {
    coords: CoordinateSystem,
    series: IndexMap<String, MemorySeries>,
    auto_range: AutoRangeEngine,
    follow: FollowLatestController,
    events: DataEventQueue,
}

impl ChartEngine {
    pub fn new(config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let mut viewport = Viewport::new(config.width, config.height);
        viewport.set_insets(config.insets);
        viewport.set_time_range(config.time_start, config.time_end)?;

        let mut follow = FollowLatestController::new(config.follow.bar_duration);
        follow.set_enabled(config.follow.enabled);

        debug!(
            width = config.width,
            height = config.height,
            time_start = config.time_start,
            time_end = config.time_end,
            follow = config.follow.enabled,
            "chart engine created"
        );

        Ok(Self {
            coords: CoordinateSystem::new(viewport),
            series: IndexMap::new(),
            auto_range: AutoRangeEngine,
            follow,
            events: DataEventQueue::new(),
        })
    }

    // --- series lifecycle ---

    /// Registers a series on the default axis.
    pub fn add_series(&mut self, series_id: impl Into<String>) -> ChartResult<()> {
        self.add_series_on_axis(series_id, DEFAULT_AXIS_ID)
    }

    /// Registers a series bound to a specific axis.
    pub fn add_series_on_axis(
        &mut self,
        series_id: impl Into<String>,
        axis_id: impl Into<String>,
    ) -> ChartResult<()> {
        let series_id = series_id.into();
        if self.series.contains_key(&series_id) {
            return Err(ChartError::InvalidData(format!(
                "series '{series_id}' already exists"
            )));
        }
        self.coords.bind_series(series_id.clone(), axis_id)?;
        self.series.insert(series_id, MemorySeries::new());
        Ok(())
    }

    pub fn remove_series(&mut self, series_id: &str) -> ChartResult<()> {
        if self.series.shift_remove(series_id).is_none() {
            return Err(ChartError::UnknownSeries(series_id.to_string()));
        }
        self.coords.unbind_series(series_id);
        self.events.forget(series_id);
        Ok(())
    }

    pub fn series(&self, series_id: &str) -> ChartResult<&MemorySeries> {
        self.series
            .get(series_id)
            .ok_or_else(|| ChartError::UnknownSeries(series_id.to_string()))
    }

    pub fn series_ids(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    // --- data path (enqueues, applied at begin_frame) ---

    pub fn set_series_data(&mut self, series_id: &str, samples: Vec<Sample>) -> ChartResult<()> {
        self.series_mut(series_id)?.set_data(samples);
        self.events.push(series_id, DataEvent::Replaced);
        Ok(())
    }

    pub fn append_sample(&mut self, series_id: &str, sample: Sample) -> ChartResult<()> {
        self.series_mut(series_id)?.append(sample)?;
        self.events.push(
            series_id,
            DataEvent::Appended {
                latest_time: sample.x,
            },
        );
        Ok(())
    }

    /// Replaces the latest sample in place, or appends when the time moved on.
    pub fn update_sample(&mut self, series_id: &str, sample: Sample) -> ChartResult<()> {
        let series = self.series_mut(series_id)?;
        let appended = series.latest().is_none_or(|latest| sample.x > latest.x);
        series.update_latest(sample)?;
        let event = if appended {
            DataEvent::Appended {
                latest_time: sample.x,
            }
        } else {
            DataEvent::Updated
        };
        self.events.push(series_id, event);
        Ok(())
    }

    pub fn clear_series(&mut self, series_id: &str) -> ChartResult<()> {
        self.series_mut(series_id)?.clear();
        self.events.push(series_id, DataEvent::Cleared);
        Ok(())
    }

    // --- frame driver ---

    /// Applies queued data events to viewport and axis state.
    ///
    /// Drains the coalesced queue, lets the follow controller chase the
    /// newest appended time, then runs auto-range over every bound series.
    /// Call once per render tick, before any coordinate queries.
    pub fn begin_frame(&mut self) -> ChartResult<FrameUpdate> {
        let drained = self.events.drain();
        let mut update = FrameUpdate {
            events_processed: drained.len(),
            ..FrameUpdate::default()
        };

        let newest_appended = drained
            .values()
            .filter_map(|event| match event {
                DataEvent::Appended { latest_time } => Some(*latest_time),
                _ => None,
            })
            .max();
        if let Some(latest_time) = newest_appended {
            update.viewport_shifted = self.follow.on_appended(&mut self.coords, latest_time)?;
        }

        let bound: Vec<(&str, &dyn SeriesValues)> = self
            .series
            .iter()
            .map(|(id, series)| (id.as_str(), series as &dyn SeriesValues))
            .collect();
        update.axes_auto_ranged = self.auto_range.run(&mut self.coords, &bound);

        Ok(update)
    }

    // --- coordinate passthroughs ---

    pub fn coords(&mut self) -> &mut CoordinateSystem {
        &mut self.coords
    }

    pub fn viewport(&self) -> &Viewport {
        self.coords.viewport()
    }

    pub fn visible_window(&self) -> (i64, i64) {
        self.coords.viewport().time_range()
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.coords.set_size(width, height);
    }

    pub fn set_time_range(&mut self, start_time: i64, end_time: i64) -> ChartResult<()> {
        self.coords.set_time_range(start_time, end_time)
    }

    pub fn pan(&mut self, delta_x_px: f64) {
        self.coords.pan(delta_x_px);
    }

    pub fn zoom(&mut self, factor: f64, anchor_x_px: f64) {
        self.coords.zoom(factor, anchor_x_px);
    }

    /// Fits the visible window to the full X extent of all series.
    pub fn fit_content(&mut self) -> ChartResult<bool> {
        let min_x = self.series.values().filter_map(SeriesValues::min_x).min();
        let max_x = self.series.values().filter_map(SeriesValues::max_x).max();
        match (min_x, max_x) {
            (Some(min_x), Some(max_x)) => {
                self.coords.zoom_to_fit(min_x, max_x)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn x_to_pixel(&mut self, x: i64) -> f64 {
        self.coords.x_to_pixel(x)
    }

    pub fn pixel_to_x(&mut self, pixel: f64) -> i64 {
        self.coords.pixel_to_x(pixel)
    }

    pub fn value_to_pixel(&mut self, axis_id: &str, value: f64) -> ChartResult<f64> {
        self.coords.value_to_pixel(axis_id, value)
    }

    pub fn pixel_to_value(&mut self, axis_id: &str, pixel: f64) -> ChartResult<f64> {
        self.coords.pixel_to_value(axis_id, pixel)
    }

    // --- axis passthroughs ---

    pub fn create_axis(
        &mut self,
        axis_id: impl Into<String>,
        position: AxisPosition,
    ) -> ChartResult<()> {
        self.coords.create_axis(axis_id, position)?;
        self.coords.sync_insets_from_axes();
        Ok(())
    }

    pub fn remove_axis(&mut self, axis_id: &str) -> ChartResult<()> {
        self.coords.remove_axis(axis_id)?;
        self.coords.sync_insets_from_axes();
        Ok(())
    }

    pub fn axis(&self, axis_id: &str) -> ChartResult<&ValueAxis> {
        self.coords.axis(axis_id)
    }

    pub fn set_axis_range(&mut self, axis_id: &str, min: f64, max: f64) -> ChartResult<()> {
        self.coords.set_axis_range(axis_id, min, max)
    }

    pub fn set_axis_scale(&mut self, axis_id: &str, scale: AxisScale) -> ChartResult<()> {
        self.coords.set_axis_scale(axis_id, scale)
    }

    pub fn set_auto_range_mode(&mut self, axis_id: &str, mode: AutoRangeMode) -> ChartResult<()> {
        self.coords.set_auto_range_mode(axis_id, mode)
    }

    // --- follow passthroughs ---

    pub fn follow(&self) -> &FollowLatestController {
        &self.follow
    }

    pub fn set_follow_enabled(&mut self, enabled: bool) {
        self.follow.set_enabled(enabled);
    }

    pub fn set_follow_bar_duration(&mut self, bar_duration: i64) {
        self.follow.set_bar_duration(bar_duration);
    }

    fn series_mut(&mut self, series_id: &str) -> ChartResult<&mut MemorySeries> {
        self.series
            .get_mut(series_id)
            .ok_or_else(|| ChartError::UnknownSeries(series_id.to_string()))
    }
}
