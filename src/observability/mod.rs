//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Server internals:
//!     → logging.rs (tracing events, gated by the shared AtomicLevel)
//!     → metrics.rs (level change counters, current level gauge)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
