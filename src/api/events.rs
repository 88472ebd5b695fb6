use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Pending change notification for one series, coalesced until the next frame.
///
/// Consumers only distinguish two things: whether anything changed at all
/// (everything here triggers a rescan) and whether the change carries a new
/// latest time the viewport may want to follow. The merge rules below keep
/// exactly those facts when several mutations land between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataEvent {
    /// Full data set replaced.
    Replaced,
    /// All samples removed.
    Cleared,
    /// A sample was appended past the previous latest time.
    Appended { latest_time: i64 },
    /// The latest sample's value changed in place.
    Updated,
}

impl DataEvent {
    /// Folds a newer event into an already-queued one.
    #[must_use]
    pub fn merge(self, next: DataEvent) -> DataEvent {
        match (self, next) {
            (DataEvent::Appended { latest_time: a }, DataEvent::Appended { latest_time: b }) => {
                DataEvent::Appended {
                    latest_time: a.max(b),
                }
            }
            // An in-place update does not move time; the queued append still
            // carries the newest timestamp.
            (DataEvent::Appended { latest_time }, DataEvent::Updated) => {
                DataEvent::Appended { latest_time }
            }
            // Append after replace/clear: the append's timestamp is the new
            // frontier and a rescan happens either way.
            (_, next) => next,
        }
    }
}

/// Per-series coalescing queue drained once per frame.
///
/// Insertion order is preserved so a frame processes series in the order
/// they first changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEventQueue {
    pending: IndexMap<String, DataEvent>,
}

impl DataEventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, series_id: impl Into<String>, event: DataEvent) {
        let series_id = series_id.into();
        match self.pending.get_mut(&series_id) {
            Some(existing) => *existing = existing.merge(event),
            None => {
                self.pending.insert(series_id, event);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn pending(&self, series_id: &str) -> Option<DataEvent> {
        self.pending.get(series_id).copied()
    }

    /// Drops any queued event for a series that no longer exists.
    pub fn forget(&mut self, series_id: &str) {
        self.pending.shift_remove(series_id);
    }

    /// Takes every queued event, leaving the queue empty.
    pub fn drain(&mut self) -> IndexMap<String, DataEvent> {
        std::mem::take(&mut self.pending)
    }
}
