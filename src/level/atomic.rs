//! Shared, lock-free severity threshold.
//!
//! # Responsibilities
//! - Hold the minimum severity that loggers emit
//! - Let any number of loggers and HTTP handlers share one threshold
//! - Make a new threshold visible to every subsequent log call
//!
//! # Design Decisions
//! - One `AtomicU8` behind an `Arc`; clones are handles to the same cell
//! - SeqCst loads and stores so reads and writes are linearizable
//! - Concurrent writers race; whichever store lands last wins

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::level::Severity;

/// Process-wide severity threshold shared by reference.
#[derive(Clone)]
pub struct AtomicLevel {
    inner: Arc<AtomicU8>,
}

impl AtomicLevel {
    /// Create a new, independent cell starting at `level`.
    pub fn new(level: Severity) -> Self {
        Self {
            inner: Arc::new(AtomicU8::new(level as u8)),
        }
    }

    /// Current threshold.
    pub fn get(&self) -> Severity {
        Severity::from(self.inner.load(Ordering::SeqCst))
    }

    /// Replace the threshold.
    pub fn set(&self, level: Severity) {
        self.inner.store(level as u8, Ordering::SeqCst);
    }

    /// Replace the threshold, returning the one it displaced.
    pub fn swap(&self, level: Severity) -> Severity {
        Severity::from(self.inner.swap(level as u8, Ordering::SeqCst))
    }

    /// Whether a record at `level` passes the current threshold.
    pub fn enabled(&self, level: Severity) -> bool {
        level >= self.get()
    }

    /// Whether two handles point at the same cell.
    pub fn same_cell(&self, other: &AtomicLevel) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Severity::default())
    }
}

impl fmt::Debug for AtomicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicLevel").field(&self.get()).finish()
    }
}
