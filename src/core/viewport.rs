use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel margins reserved around the plot area for axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Insets {
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// The currently visible X domain window plus the drawable pixel geometry.
///
/// X values are axis-agnostic `i64`: epoch milliseconds for time-driven
/// charts, category indices for index-driven charts. Y ranges live on the
/// value axes, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    start_time: i64,
    end_time: i64,
    width: u32,
    height: u32,
    insets: Insets,
    // Sub-unit pan carry so small pixel deltas on narrow windows are not
    // truncated to zero.
    pan_remainder: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            start_time: 0,
            end_time: 1,
            width: 800,
            height: 600,
            insets: Insets::new(0.0, 60.0, 10.0, 30.0),
            pan_remainder: 0.0,
        }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    #[must_use]
    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    #[must_use]
    pub fn time_range(&self) -> (i64, i64) {
        (self.start_time, self.end_time)
    }

    #[must_use]
    pub fn visible_duration(&self) -> i64 {
        self.end_time - self.start_time
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Plot-area width with insets removed, never below one pixel.
    #[must_use]
    pub fn chart_width(&self) -> f64 {
        (f64::from(self.width) - self.insets.left - self.insets.right).max(1.0)
    }

    /// Plot-area height with insets removed, never below one pixel.
    #[must_use]
    pub fn chart_height(&self) -> f64 {
        (f64::from(self.height) - self.insets.top - self.insets.bottom).max(1.0)
    }

    #[must_use]
    pub fn pixels_per_milli(&self) -> f64 {
        let duration = self.visible_duration();
        if duration > 0 {
            self.chart_width() / duration as f64
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn estimate_visible_bar_count(&self, bar_duration: i64) -> i64 {
        if bar_duration <= 0 {
            return 0;
        }
        self.visible_duration() / bar_duration
    }

    /// Pixels available per bar; useful for level-of-detail decisions.
    #[must_use]
    pub fn pixels_per_bar(&self, bar_duration: i64) -> f64 {
        let bar_count = self.estimate_visible_bar_count(bar_duration);
        if bar_count > 0 {
            self.chart_width() / bar_count as f64
        } else {
            self.chart_width()
        }
    }

    pub fn set_time_range(&mut self, start_time: i64, end_time: i64) -> ChartResult<()> {
        if end_time < start_time {
            return Err(ChartError::InvalidData(format!(
                "viewport end time {end_time} must be >= start time {start_time}"
            )));
        }
        self.start_time = start_time;
        self.end_time = end_time;
        Ok(())
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
    }

    /// Shifts the visible window by a horizontal pixel delta.
    ///
    /// Fractional domain movement accumulates across calls and is applied
    /// once it reaches a whole unit.
    pub fn pan(&mut self, delta_x_px: f64) {
        if !delta_x_px.is_finite() {
            return;
        }

        let time_per_pixel = self.visible_duration() as f64 / self.chart_width();
        self.pan_remainder += delta_x_px * time_per_pixel;

        let whole = self.pan_remainder.trunc() as i64;
        if whole != 0 {
            self.start_time -= whole;
            self.end_time -= whole;
            self.pan_remainder -= whole as f64;
        }
    }

    /// Zooms the visible window around a pixel anchor.
    ///
    /// `factor > 1` zooms in. The factor is clamped to `[0.1, 10.0]` and the
    /// window never collapses below one domain unit.
    pub fn zoom(&mut self, factor: f64, anchor_x_px: f64) {
        if !factor.is_finite() || !anchor_x_px.is_finite() {
            return;
        }
        let factor = factor.clamp(0.1, 10.0);

        let anchor_time = self.pixel_to_time(anchor_x_px);
        let left = anchor_time - self.start_time;
        let right = self.end_time - anchor_time;

        self.start_time = anchor_time - (left as f64 / factor) as i64;
        self.end_time = anchor_time + (right as f64 / factor) as i64;

        if self.end_time - self.start_time < 1 {
            self.end_time = self.start_time + 1;
        }
    }

    /// Fits the window to a data extent with a small symmetric time padding.
    pub fn zoom_to_fit(&mut self, min_x: i64, max_x: i64) -> ChartResult<()> {
        if max_x < min_x {
            return Err(ChartError::InvalidData(format!(
                "fit extent max {max_x} must be >= min {min_x}"
            )));
        }
        let padding = ((max_x - min_x) as f64 * 0.02) as i64;
        self.start_time = min_x - padding;
        self.end_time = max_x + padding;
        if self.end_time - self.start_time < 1 {
            self.end_time = self.start_time + 1;
        }
        Ok(())
    }

    fn pixel_to_time(&self, pixel: f64) -> i64 {
        let normalized = (pixel - self.insets.left) / self.chart_width();
        self.start_time + (normalized * self.visible_duration() as f64) as i64
    }
}
