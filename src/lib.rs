//! Structured logging with a runtime-switchable level.
//!
//! A single [`AtomicLevel`] is shared by every [`Logger`], by the process's
//! own `tracing` output and by an HTTP endpoint, so an operator can change
//! verbosity for the whole process with one request.

pub mod admin;
pub mod config;
pub mod http;
pub mod level;
pub mod lifecycle;
pub mod logger;
pub mod observability;

pub use config::ServerConfig;
pub use http::AdminServer;
pub use level::{AtomicLevel, Severity};
pub use lifecycle::Shutdown;
pub use logger::{Field, Logger, LoggerBuilder, LoggerConfig};
