use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::coordinate::CoordinateSystem;
use crate::error::ChartResult;

/// Keeps the viewport tracking newly appended data without changing zoom.
///
/// When the latest data time plus a lookahead margin passes the right edge
/// of the visible window, the whole window shifts right by the overflow.
/// The window width is preserved, so this is a pure shift, and repeated
/// calls with no new overflow are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowLatestController {
    enabled: bool,
    bar_duration: i64,
    lookahead: i64,
}

impl Default for FollowLatestController {
    fn default() -> Self {
        Self {
            enabled: false,
            bar_duration: 1,
            lookahead: 0,
        }
    }
}

impl FollowLatestController {
    /// Creates an enabled controller with a half-bar lookahead margin.
    #[must_use]
    pub fn new(bar_duration: i64) -> Self {
        let bar_duration = bar_duration.max(1);
        Self {
            enabled: true,
            bar_duration,
            lookahead: bar_duration / 2,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn bar_duration(&self) -> i64 {
        self.bar_duration
    }

    /// Sets the nominal bar duration and rederives the half-bar lookahead.
    pub fn set_bar_duration(&mut self, bar_duration: i64) {
        self.bar_duration = bar_duration.max(1);
        self.lookahead = self.bar_duration / 2;
    }

    /// Lookahead margin in domain units kept free past the latest sample.
    #[must_use]
    pub fn lookahead(&self) -> i64 {
        self.lookahead
    }

    pub fn set_lookahead(&mut self, lookahead: i64) {
        self.lookahead = lookahead.max(0);
    }

    /// Reacts to a data append; returns `true` when the viewport shifted.
    pub fn on_appended(
        &self,
        coords: &mut CoordinateSystem,
        latest_time: i64,
    ) -> ChartResult<bool> {
        if !self.enabled {
            return Ok(false);
        }

        let (start, end) = coords.viewport().time_range();
        let target_end = latest_time + self.lookahead;
        if target_end <= end {
            return Ok(false);
        }

        let shift = target_end - end;
        coords.set_time_range(start + shift, end + shift)?;
        trace!(shift, latest_time, "follow-latest viewport shift");
        Ok(true)
    }
}
