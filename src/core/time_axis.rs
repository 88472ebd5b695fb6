use serde::{Deserialize, Serialize};

use crate::core::horizontal::{HorizontalAxis, HorizontalPosition};
use crate::error::{ChartError, ChartResult};

/// Time-based horizontal axis mapping epoch-millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    id: String,
    position: HorizontalPosition,
    min_time: i64,
    max_time: i64,
    grow_by: f64,
    visible: bool,
}

impl Default for TimeAxis {
    fn default() -> Self {
        Self::new("time", HorizontalPosition::Bottom)
    }
}

impl TimeAxis {
    #[must_use]
    pub fn new(id: impl Into<String>, position: HorizontalPosition) -> Self {
        Self {
            id: id.into(),
            position,
            min_time: 0,
            max_time: 1,
            grow_by: 0.0,
            visible: true,
        }
    }

    #[must_use]
    pub fn visible_range(&self) -> (i64, i64) {
        (self.min_time, self.max_time)
    }

    #[must_use]
    pub fn visible_duration(&self) -> i64 {
        self.max_time - self.min_time
    }

    /// Padding fraction applied when fitting the axis to data.
    #[must_use]
    pub fn grow_by(&self) -> f64 {
        self.grow_by
    }

    pub fn set_grow_by(&mut self, fraction: f64) {
        self.grow_by = fraction.max(0.0);
    }

    pub fn set_visible_range(&mut self, min_time: i64, max_time: i64) -> ChartResult<()> {
        if max_time < min_time {
            return Err(ChartError::InvalidRange {
                axis_id: self.id.clone(),
                scale: "time",
                min: min_time as f64,
                max: max_time as f64,
            });
        }
        self.min_time = min_time;
        self.max_time = max_time;
        Ok(())
    }
}

impl HorizontalAxis for TimeAxis {
    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> HorizontalPosition {
        self.position
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn to_normalized(&self, value: i64) -> f64 {
        let duration = self.max_time - self.min_time;
        if duration == 0 {
            return 0.5;
        }
        (value - self.min_time) as f64 / duration as f64
    }

    fn is_time_based(&self) -> bool {
        true
    }
}
