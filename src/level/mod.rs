//! Severity threshold subsystem.
//!
//! # Data Flow
//! ```text
//! config / builder
//!     → AtomicLevel::new (initial threshold)
//!     → cloned into every Logger, the admin router, the tracing filter
//!
//! PUT /loglevel
//!     → admin::handlers validates the name
//!     → AtomicLevel::set
//!     → next log call on any thread reads the new threshold
//! ```

pub mod atomic;
pub mod filter;
pub mod severity;

pub use atomic::AtomicLevel;
pub use severity::{ParseSeverityError, Severity};
