//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dynlog_level_changes_total` (counter): accepted level changes by target level
//! - `dynlog_level_change_rejected_total` (counter): rejected requests by reason
//! - `dynlog_level` (gauge): current level, 0=debug … 4=fatal

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::level::{AtomicLevel, Severity};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count a change to `to`, then bring the gauge in line with `level`.
pub fn record_level_change(to: Severity, level: &AtomicLevel) {
    counter!("dynlog_level_changes_total", "to" => to.as_str()).increment(1);
    sync_level_gauge(level);
}

/// Set the gauge from the cell, re-reading until the cell did not move while
/// the gauge was written. A racing writer that lost the swap therefore cannot
/// leave its own, stale value in the gauge. Returns the value published.
pub fn sync_level_gauge(level: &AtomicLevel) -> Severity {
    loop {
        let current = level.get();
        record_current_level(current);
        if level.get() == current {
            return current;
        }
    }
}

fn record_current_level(level: Severity) {
    gauge!("dynlog_level").set(level as u8 as f64);
}

pub fn record_level_rejected(reason: &'static str) {
    counter!("dynlog_level_change_rejected_total", "reason" => reason).increment(1);
}
