//! Observability plumbing for Saloon front ends.
//!
//! - `tracing_layer`: [`SessionEventLayer`] forwarding session events to a channel
//! - [`init_tracing`]: installs the global subscriber

pub mod tracing_layer;

pub use tracing_layer::{SessionEvent, SessionEventLayer};

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{Layer, fmt};

/// Level used when neither an explicit level nor `RUST_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Builds the filter: an explicit `level` wins, then `RUST_LOG`, then
/// [`DEFAULT_LOG_LEVEL`].
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    }
}

/// Installs the global subscriber: human-readable logs on stderr plus,
/// when given, the session event layer. Each layer gets its own filter.
pub fn init_tracing(
    level: Option<&str>,
    events: Option<SessionEventLayer>,
) -> Result<(), TryInitError> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(build_filter(level));
    let event_layer = events.map(|layer| layer.with_filter(build_filter(level)));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(event_layer)
        .try_init()
}
