use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[cfg(feature = "parallel-scan")]
use rayon::prelude::*;

use crate::error::{ChartError, ChartResult};

/// One time/value sample; `x` is epoch milliseconds (or a category index).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: i64,
    pub y: f64,
}

impl Sample {
    #[must_use]
    pub const fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a sample from exact-decimal market data.
    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        let y = value.to_f64().ok_or_else(|| {
            ChartError::InvalidData("value cannot be represented as f64".to_owned())
        })?;
        Ok(Self {
            x: time.timestamp_millis(),
            y,
        })
    }
}

/// Read-only view of a data series as the coordinate core consumes it.
///
/// Implementations are expected to keep samples in ascending `x` order.
pub trait SeriesValues {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn min_x(&self) -> Option<i64>;

    fn max_x(&self) -> Option<i64>;

    /// Index of the first sample at or after `x`, if any.
    fn index_at_or_after(&self, x: i64) -> Option<usize>;

    /// Index of the last sample at or before `x`, if any.
    fn index_at_or_before(&self, x: i64) -> Option<usize>;

    /// Min/max of finite values over the inclusive index window.
    ///
    /// Returns `None` when the window is empty or holds no finite sample.
    fn value_bounds(&self, first: usize, last: usize) -> Option<(f64, f64)>;
}

/// In-memory, time-ordered sample series with realtime update semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MemorySeries {
    samples: Vec<Sample>,
}

impl MemorySeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the series content with a canonical (sorted, time-deduped)
    /// copy of `samples`; later duplicates win.
    pub fn set_data(&mut self, mut samples: Vec<Sample>) {
        samples.sort_by_key(|sample| sample.x);
        samples.reverse();
        samples.dedup_by_key(|sample| sample.x);
        samples.reverse();
        trace!(count = samples.len(), "set series data");
        self.samples = samples;
    }

    /// Appends a sample; time must be newer than the latest sample.
    pub fn append(&mut self, sample: Sample) -> ChartResult<()> {
        if let Some(last) = self.samples.last() {
            if sample.x <= last.x {
                return Err(ChartError::InvalidData(format!(
                    "appended time {} must be > latest time {}",
                    sample.x, last.x
                )));
            }
        }
        self.samples.push(sample);
        trace!(count = self.samples.len(), "append sample");
        Ok(())
    }

    /// Realtime update semantics:
    /// - appends when `sample.x` is newer than the latest sample
    /// - replaces the latest sample when `sample.x` is equal
    /// - rejects out-of-order updates
    pub fn update_latest(&mut self, sample: Sample) -> ChartResult<()> {
        match self
            .samples
            .last()
            .map_or(Ordering::Greater, |last| sample.x.cmp(&last.x))
        {
            Ordering::Less => Err(ChartError::InvalidData(format!(
                "update time {} must be >= latest sample time",
                sample.x
            ))),
            Ordering::Equal => {
                if let Some(last) = self.samples.last_mut() {
                    *last = sample;
                } else {
                    self.samples.push(sample);
                }
                Ok(())
            }
            Ordering::Greater => {
                self.samples.push(sample);
                Ok(())
            }
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn latest(&self) -> Option<Sample> {
        self.samples.last().copied()
    }
}

impl SeriesValues for MemorySeries {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn min_x(&self) -> Option<i64> {
        self.samples.first().map(|sample| sample.x)
    }

    fn max_x(&self) -> Option<i64> {
        self.samples.last().map(|sample| sample.x)
    }

    fn index_at_or_after(&self, x: i64) -> Option<usize> {
        let index = self.samples.partition_point(|sample| sample.x < x);
        (index < self.samples.len()).then_some(index)
    }

    fn index_at_or_before(&self, x: i64) -> Option<usize> {
        let index = self.samples.partition_point(|sample| sample.x <= x);
        index.checked_sub(1)
    }

    fn value_bounds(&self, first: usize, last: usize) -> Option<(f64, f64)> {
        if first > last || first >= self.samples.len() {
            return None;
        }
        let last = last.min(self.samples.len() - 1);
        let window = &self.samples[first..=last];

        #[cfg(feature = "parallel-scan")]
        {
            window
                .par_iter()
                .filter(|sample| sample.y.is_finite())
                .map(|sample| (OrderedFloat(sample.y), OrderedFloat(sample.y)))
                .reduce_with(|(min_a, max_a), (min_b, max_b)| {
                    (min_a.min(min_b), max_a.max(max_b))
                })
                .map(|(min, max)| (min.0, max.0))
        }

        #[cfg(not(feature = "parallel-scan"))]
        {
            window
                .iter()
                .filter(|sample| sample.y.is_finite())
                .map(|sample| OrderedFloat(sample.y))
                .fold(None, |acc: Option<(OrderedFloat<f64>, OrderedFloat<f64>)>, y| {
                    Some(match acc {
                        Some((min, max)) => (min.min(y), max.max(y)),
                        None => (y, y),
                    })
                })
                .map(|(min, max)| (min.0, max.0))
        }
    }
}
