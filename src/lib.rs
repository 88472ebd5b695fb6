//! chartx: multi-axis coordinate and auto-ranging engine for charts.
//!
//! This crate maps data-space values (time or category index on X, scaled
//! values on Y) to pixel space across any number of value axes, keeps the
//! resulting transforms cached with strict invalidation, and drives
//! auto-range and realtime viewport-follow from coalesced data events.
//! Rendering is deliberately out of scope; the output of every query is
//! plain pixel geometry a host renderer consumes.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
