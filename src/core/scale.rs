use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Hard cap on generated grid levels, independent of the requested count.
pub const MAX_GRID_LEVELS: usize = 100;

/// Value-to-normalized mapping strategy bound to a value axis.
///
/// Every method is total over the full `f64` domain: degenerate ranges,
/// NaN and infinities yield a neutral sentinel instead of panicking, since
/// these run on the per-frame coordinate path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum AxisScale {
    /// Uniform spacing in raw value units.
    #[default]
    Linear,
    /// Uniform spacing in log-space (all values must be > 0).
    Log(LogScale),
    /// Linear spacing, labelled as signed deviation from a reference value.
    Percentage(PercentageScale),
    /// Discrete ordered slots; "values" are category indices.
    Category(CategoryScale),
}

impl AxisScale {
    /// Short strategy name used in errors and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log(_) => "log",
            Self::Percentage(_) => "percentage",
            Self::Category(_) => "category",
        }
    }

    /// Maps a value into `[0, 1]` relative to `[min, max]`.
    ///
    /// Degenerate input (non-finite, empty or inverted span, non-positive
    /// values under log) returns 0.5.
    #[must_use]
    pub fn normalize(self, value: f64, min: f64, max: f64) -> f64 {
        match self {
            Self::Linear | Self::Percentage(_) => linear_normalize(value, min, max),
            Self::Log(log) => log.normalize(value, min, max),
            Self::Category(category) => category.normalize(value),
        }
    }

    /// Inverse of [`Self::normalize`]; degenerate input returns the `min` bound.
    #[must_use]
    pub fn interpolate(self, normalized: f64, min: f64, max: f64) -> f64 {
        match self {
            Self::Linear | Self::Percentage(_) => linear_interpolate(normalized, min, max),
            Self::Log(log) => log.interpolate(normalized, min, max),
            Self::Category(category) => category.interpolate(normalized),
        }
    }

    /// Generates sorted "nice" grid levels inside `[min, max]`.
    ///
    /// `target_count` is a hint; the result never exceeds [`MAX_GRID_LEVELS`].
    #[must_use]
    pub fn grid_levels(self, min: f64, max: f64, target_count: usize) -> Vec<f64> {
        match self {
            Self::Linear => linear_grid_levels(min, max, target_count),
            Self::Log(log) => log.grid_levels(min, max, target_count),
            Self::Percentage(percentage) => percentage.grid_levels(min, max, target_count),
            Self::Category(category) => category.grid_levels(target_count),
        }
    }

    /// Formats a value for axis labels.
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        match self {
            Self::Linear => format_plain(value),
            Self::Log(log) => log.format_value(value),
            Self::Percentage(percentage) => percentage.format_value(value),
            Self::Category(_) => format!("{}", value.floor() as i64),
        }
    }

    /// Returns whether `[min, max]` may be committed to an axis using this scale.
    ///
    /// This is the one gate callers must consult before a range mutation.
    #[must_use]
    pub fn is_valid_range(self, min: f64, max: f64) -> bool {
        match self {
            Self::Linear | Self::Percentage(_) => {
                max >= min && min.is_finite() && max.is_finite()
            }
            Self::Log(_) => min > 0.0 && max > min && min.is_finite() && max.is_finite(),
            Self::Category(category) => category.count > 0 && max >= min,
        }
    }
}

/// Logarithmic scale parametrized by base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogScale {
    base: f64,
    #[serde(default)]
    scientific_notation: bool,
}

impl LogScale {
    /// Creates a log scale with an arbitrary base (> 1).
    pub fn new(base: f64, scientific_notation: bool) -> ChartResult<Self> {
        if !base.is_finite() || base <= 1.0 {
            return Err(ChartError::InvalidData(format!(
                "log base must be finite and > 1, got {base}"
            )));
        }
        Ok(Self {
            base,
            scientific_notation,
        })
    }

    #[must_use]
    pub fn base10() -> Self {
        Self {
            base: 10.0,
            scientific_notation: false,
        }
    }

    #[must_use]
    pub fn base2() -> Self {
        Self {
            base: 2.0,
            scientific_notation: false,
        }
    }

    #[must_use]
    pub fn natural() -> Self {
        Self {
            base: std::f64::consts::E,
            scientific_notation: false,
        }
    }

    #[must_use]
    pub fn with_scientific_notation(mut self, enabled: bool) -> Self {
        self.scientific_notation = enabled;
        self
    }

    #[must_use]
    pub const fn base(self) -> f64 {
        self.base
    }

    fn log(self, value: f64) -> f64 {
        value.ln() / self.base.ln()
    }

    fn normalize(self, value: f64, min: f64, max: f64) -> f64 {
        if value <= 0.0 || min <= 0.0 || max <= min {
            return 0.5;
        }
        if !value.is_finite() || !min.is_finite() || !max.is_finite() {
            return 0.5;
        }

        let log_min = self.log(min);
        let log_span = self.log(max) - log_min;
        if log_span == 0.0 || !log_span.is_finite() {
            return 0.5;
        }
        (self.log(value) - log_min) / log_span
    }

    fn interpolate(self, normalized: f64, min: f64, max: f64) -> f64 {
        if min <= 0.0 || max <= min || !min.is_finite() || !max.is_finite() {
            return if min.is_finite() { min } else { 0.0 };
        }
        if !normalized.is_finite() {
            return min;
        }

        let log_min = self.log(min);
        let log_value = log_min + normalized * (self.log(max) - log_min);
        self.base.powf(log_value)
    }

    fn grid_levels(self, min: f64, max: f64, target_count: usize) -> Vec<f64> {
        if min <= 0.0 || max <= min || target_count == 0 {
            return Vec::new();
        }
        if !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }

        let exp_min = self.log(min).floor() as i64;
        let exp_max = self.log(max).ceil() as i64;

        // Subdivisions at x2/x5 for base 10 and x1.5 for base 2 keep labels
        // readable when few whole powers fall inside the range.
        let exp_range = exp_max - exp_min;
        let subdivide = exp_range <= (target_count / 2) as i64;
        let subdivisions: SmallVec<[f64; 3]> = if self.base == 10.0 && subdivide {
            SmallVec::from_slice(&[1.0, 2.0, 5.0])
        } else if self.base == 2.0 && subdivide {
            SmallVec::from_slice(&[1.0, 1.5])
        } else {
            SmallVec::from_slice(&[1.0])
        };

        let mut levels = Vec::new();
        for exp in exp_min..=exp_max {
            let power = self.base.powi(exp as i32);
            for multiplier in &subdivisions {
                let level = power * multiplier;
                if level >= min && level <= max {
                    levels.push(level);
                }
            }
        }

        decimate_levels(levels, target_count)
    }

    fn format_value(self, value: f64) -> String {
        if self.scientific_notation && (value >= 1e6 || value <= 1e-4) {
            return format!("{value:.2e}");
        }

        // Clean powers of ten render without decimals.
        if self.base == 10.0 && value >= 1.0 && is_power_of_ten(value) {
            return format!("{value:.0}");
        }

        format_plain(value)
    }
}

/// Linear scale labelled as percentage deviation from a reference value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageScale {
    reference: f64,
    #[serde(default = "default_show_plus_sign")]
    show_plus_sign: bool,
}

fn default_show_plus_sign() -> bool {
    true
}

impl PercentageScale {
    /// Creates a percentage scale; `reference` represents 0% and must be non-zero.
    pub fn new(reference: f64) -> ChartResult<Self> {
        if !reference.is_finite() || reference == 0.0 {
            return Err(ChartError::InvalidData(
                "percentage scale reference must be finite and non-zero".to_owned(),
            ));
        }
        Ok(Self {
            reference,
            show_plus_sign: true,
        })
    }

    #[must_use]
    pub fn with_plus_sign(mut self, show: bool) -> Self {
        self.show_plus_sign = show;
        self
    }

    #[must_use]
    pub const fn reference(self) -> f64 {
        self.reference
    }

    fn to_percent(self, value: f64) -> f64 {
        ((value - self.reference) / self.reference) * 100.0
    }

    fn from_percent(self, percent: f64) -> f64 {
        self.reference * (1.0 + percent / 100.0)
    }

    fn grid_levels(self, min: f64, max: f64, target_count: usize) -> Vec<f64> {
        if !min.is_finite() || !max.is_finite() || target_count == 0 {
            return Vec::new();
        }

        // A negative reference makes to_percent order-reversing, so the
        // percent endpoints are re-sorted before walking.
        let a = self.to_percent(min);
        let b = self.to_percent(max);
        let (min_pct, max_pct) = (a.min(b), a.max(b));
        let pct_range = max_pct - min_pct;
        if !(pct_range > 0.0) || !pct_range.is_finite() {
            return Vec::new();
        }

        let interval = nice_interval(pct_range, target_count);
        let first_pct = (min_pct / interval).ceil() * interval;

        let mut levels = Vec::new();
        let mut pct = first_pct;
        while pct <= max_pct && levels.len() < MAX_GRID_LEVELS {
            levels.push(self.from_percent(pct));
            pct += interval;
        }
        if self.reference < 0.0 {
            levels.reverse();
        }
        levels
    }

    fn format_value(self, value: f64) -> String {
        let pct = self.to_percent(value);
        let formatted = if pct.abs() >= 100.0 {
            format!("{pct:.1}%")
        } else {
            format!("{pct:.2}%")
        };
        if self.show_plus_sign && pct > 0.0 {
            format!("+{formatted}")
        } else {
            formatted
        }
    }
}

/// Discrete ordered slot scale; index `i` of `count` normalizes to `i / count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryScale {
    pub count: usize,
}

impl CategoryScale {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self { count }
    }

    fn normalize(self, index: f64) -> f64 {
        if self.count == 0 || !index.is_finite() {
            return 0.5;
        }
        index / self.count as f64
    }

    fn interpolate(self, normalized: f64) -> f64 {
        if self.count == 0 || !normalized.is_finite() {
            return 0.0;
        }
        normalized * self.count as f64
    }

    fn grid_levels(self, target_count: usize) -> Vec<f64> {
        if self.count == 0 || target_count == 0 {
            return Vec::new();
        }
        let levels = (0..self.count).map(|index| index as f64).collect();
        decimate_levels(levels, target_count)
    }
}

fn linear_normalize(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() || !min.is_finite() || !max.is_finite() {
        return 0.5;
    }
    let span = max - min;
    if span <= 0.0 {
        return 0.5;
    }
    (value - min) / span
}

fn linear_interpolate(normalized: f64, min: f64, max: f64) -> f64 {
    if !min.is_finite() || !max.is_finite() {
        return 0.0;
    }
    if !normalized.is_finite() {
        return min;
    }
    min + normalized * (max - min)
}

fn linear_grid_levels(min: f64, max: f64, target_count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || target_count == 0 {
        return Vec::new();
    }
    let range = max - min;
    if !(range > 0.0) {
        return Vec::new();
    }

    let interval = nice_interval(range, target_count);
    let first = (min / interval).ceil() * interval;

    let mut levels = Vec::new();
    let mut level = first;
    while level <= max && levels.len() < MAX_GRID_LEVELS {
        levels.push(level);
        level += interval;
    }
    levels
}

/// Snaps a rough interval to the nearest 1/2/5 x 10^n step.
fn nice_interval(range: f64, target_count: usize) -> f64 {
    let rough = range / target_count as f64;
    let magnitude = 10_f64.powf(rough.log10().floor());
    let normalized = rough / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Reduces an oversized level list to roughly `target_count` entries.
fn decimate_levels(levels: Vec<f64>, target_count: usize) -> Vec<f64> {
    if levels.len() <= MAX_GRID_LEVELS {
        return levels;
    }
    let step = (levels.len() / target_count.max(1)).max(1);
    let mut reduced: Vec<f64> = levels.into_iter().step_by(step).collect();
    reduced.truncate(MAX_GRID_LEVELS);
    reduced
}

fn is_power_of_ten(value: f64) -> bool {
    if value <= 0.0 {
        return false;
    }
    let log10 = value.log10();
    (log10 - log10.round()).abs() < 1e-9
}

fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_owned();
    }
    format!("{value:.2}")
}
