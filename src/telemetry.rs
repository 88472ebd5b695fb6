//! Telemetry helpers for applications embedding `chartx`.
//!
//! The engine emits `debug!` events when auto-range applies a range and on
//! engine construction, `warn!` when a frame skips an axis it cannot
//! range, and `trace!` on viewport-follow shifts and series mutations.
//! This module keeps subscriber setup explicit and opt-in: call
//! `init_default_tracing`, or wire your own `tracing` subscriber and
//! filters (e.g. `RUST_LOG=chartx=trace`) to see those events.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
