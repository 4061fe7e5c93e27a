//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum, trace/timeout/body-limit layers)
//!     → admin::auth (only when an API key is configured)
//!     → admin::handlers (GET/PUT/POST level, GET status)
//!     → shared AtomicLevel
//! ```

pub mod server;

pub use server::AdminServer;
