//! Process diagnostics through `tracing`.
//!
//! # Responsibilities
//! - Install the global `tracing` subscriber
//! - Gate every diagnostic event on the shared [`AtomicLevel`]
//!
//! # Design Decisions
//! - `RUST_LOG` selects targets; the AtomicLevel decides severity at runtime
//! - The fmt layer carries the AtomicLevel as a per-layer filter, so a level
//!   change through the HTTP endpoint also changes what the server itself logs

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer};

use crate::level::AtomicLevel;

/// Target directives used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "dynlog=debug,tower_http=debug,info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(level: &AtomicLevel) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_DIRECTIVES.into()))
        .with(fmt::layer().with_filter(level.clone()))
        .try_init()
}
