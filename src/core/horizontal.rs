use serde::{Deserialize, Serialize};

/// Placement of a horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HorizontalPosition {
    Top,
    #[default]
    Bottom,
}

/// Common contract for X-axis variants.
///
/// Domain values are `i64`: epoch milliseconds for time axes, category
/// indices for categorical axes. Rendering layers use `is_time_based` to
/// pick label logic and `to_normalized` for screen placement.
pub trait HorizontalAxis {
    fn id(&self) -> &str;

    fn position(&self) -> HorizontalPosition;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    /// Maps a domain value to a normalized `[0, 1)` position.
    fn to_normalized(&self, value: i64) -> f64;

    fn is_time_based(&self) -> bool;
}
