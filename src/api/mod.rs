//! Embedder-facing engine surface: configuration, the frame driver, and
//! the coalesced data-event queue feeding it.

pub mod engine;
pub mod events;

pub use engine::{ChartEngine, ChartEngineConfig, FollowBehavior, FrameUpdate};
pub use events::{DataEvent, DataEventQueue};
