//! Structured JSON logger.
//!
//! # Data Flow
//! ```text
//! LoggerConfig / LoggerBuilder
//!     → options.rs (validate, open sinks)
//!     → handle.rs Logger (shared AtomicLevel + sinks)
//!
//! logger.info("msg", &fields)
//!     → AtomicLevel::enabled (fresh read every call)
//!     → encode once as JSON
//!     → sink.rs (console, rolling file, memory)
//! ```

pub mod error;
pub mod field;
pub mod global;
pub mod handle;
pub mod options;
pub mod sink;

pub use handle::Logger;
pub use error::LoggerError;
pub use field::{field, wrap_meta, Field};
pub use options::{FileRotation, LoggerBuilder, LoggerConfig, RotationPolicy};
pub use sink::{ConsoleSink, MemorySink, RollingFileSink, Sink};
