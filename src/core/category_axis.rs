use serde::{Deserialize, Serialize};

use crate::core::horizontal::{HorizontalAxis, HorizontalPosition};
use crate::core::scale::CategoryScale;

/// Categorical horizontal axis mapping an ordered label list to index slots.
///
/// Index `i` of `n` categories starts its slot at normalized `i / n`; the
/// slot center sits exactly `0.5 / n` further along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAxis {
    id: String,
    position: HorizontalPosition,
    categories: Vec<String>,
    visible: bool,
}

impl CategoryAxis {
    #[must_use]
    pub fn new(id: impl Into<String>, position: HorizontalPosition) -> Self {
        Self {
            id: id.into(),
            position,
            categories: Vec::new(),
            visible: true,
        }
    }

    /// Appends one category and returns its index.
    pub fn add_category(&mut self, label: impl Into<String>) -> usize {
        self.categories.push(label.into());
        self.categories.len() - 1
    }

    /// Replaces all categories.
    pub fn set_categories<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = labels.into_iter().map(Into::into).collect();
    }

    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Label at `index`, or the empty string when out of range.
    #[must_use]
    pub fn label(&self, index: usize) -> &str {
        self.categories
            .get(index)
            .map(String::as_str)
            .unwrap_or("")
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.categories.iter().position(|entry| entry == label)
    }

    #[must_use]
    fn scale(&self) -> CategoryScale {
        CategoryScale::new(self.categories.len())
    }

    /// Normalized position at the start of the category slot.
    #[must_use]
    pub fn index_to_normalized(&self, index: usize) -> f64 {
        if self.categories.is_empty() {
            return 0.5;
        }
        index as f64 / self.categories.len() as f64
    }

    /// Normalized position at the center of the category slot.
    #[must_use]
    pub fn index_to_center_normalized(&self, index: usize) -> f64 {
        if self.categories.is_empty() {
            return 0.5;
        }
        (index as f64 + 0.5) / self.categories.len() as f64
    }

    /// Grid levels through the categorical scale strategy: one per category.
    #[must_use]
    pub fn grid_levels(&self, target_count: usize) -> Vec<f64> {
        let count = self.categories.len();
        crate::core::scale::AxisScale::Category(self.scale()).grid_levels(
            0.0,
            count as f64,
            target_count,
        )
    }

    /// Maps a pixel position along the axis back to a category index.
    ///
    /// The result may fall outside `0..count` when the pixel lies outside
    /// the axis extent.
    #[must_use]
    pub fn pixel_to_index(&self, pixel: f64, axis_start: f64, axis_length: f64) -> i64 {
        if self.categories.is_empty() || axis_length <= 0.0 {
            return 0;
        }
        let normalized = (pixel - axis_start) / axis_length;
        (normalized * self.categories.len() as f64).floor() as i64
    }

    /// Pixel width of one category slot.
    #[must_use]
    pub fn slot_width(&self, axis_length: f64) -> f64 {
        if self.categories.is_empty() {
            return axis_length;
        }
        axis_length / self.categories.len() as f64
    }
}

impl HorizontalAxis for CategoryAxis {
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
        if value < 0 {
            return 0.0;
        }
        self.index_to_normalized(value as usize)
    }

    fn is_time_based(&self) -> bool {
        false
    }
}
