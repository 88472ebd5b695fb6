//! Coordinate-space core: scales, axes, viewport, and the transform cache.

pub mod auto_range;
pub mod category_axis;
pub mod coordinate;
pub mod follow;
pub mod horizontal;
pub mod registry;
pub mod scale;
pub mod series;
pub mod time_axis;
pub mod value_axis;
pub mod viewport;

pub use auto_range::AutoRangeEngine;
pub use category_axis::CategoryAxis;
pub use coordinate::CoordinateSystem;
pub use follow::FollowLatestController;
pub use horizontal::{HorizontalAxis, HorizontalPosition};
pub use registry::AxisRegistry;
pub use scale::{AxisScale, CategoryScale, LogScale, PercentageScale, MAX_GRID_LEVELS};
pub use series::{MemorySeries, Sample, SeriesValues};
pub use time_axis::TimeAxis;
pub use value_axis::{
    AutoRangeMode, AxisPosition, ValueAxis, VerticalAnchor, DEFAULT_AXIS_ID,
};
pub use viewport::{Insets, Viewport};
