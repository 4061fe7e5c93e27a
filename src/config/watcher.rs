//! Hot reload of the configured log level.
//!
//! A `notify` watcher re-reads the file on every modify/create event and
//! forwards configs that pass validation; [`apply_level_updates`] stores
//! their `logging.level` into the live [`AtomicLevel`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ServerConfig;
use crate::level::AtomicLevel;
use crate::observability::metrics;

/// Polling interval for backends without native file events.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Watches one config file and publishes every valid reload.
pub struct ConfigWatcher {
    path: PathBuf,
    reloads: mpsc::UnboundedSender<ServerConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end of its reloads.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ServerConfig>) {
        let (reloads, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            reloads,
        };
        (watcher, rx)
    }

    /// Start watching. Events stop when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, reloads } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Some(config) = reload_for_event(&event, &path) {
                        let _ = reloads.send(config);
                    }
                }
                Err(e) => tracing::error!(error = %e, "Config watch failed"),
            },
            Config::default().with_poll_interval(POLL_INTERVAL),
        )?;
        watcher.watch(&watched, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %watched.display(), "Config watcher started");
        Ok(watcher)
    }
}

/// Reload `path` if `event` may have changed it. `None` when the event is
/// irrelevant or the new file is invalid; the running config is kept then.
pub fn reload_for_event(event: &Event, path: &Path) -> Option<ServerConfig> {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return None;
    }

    match load_config(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "Config reloaded");
            Some(config)
        }
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "Config reload rejected, keeping current configuration"
            );
            None
        }
    }
}

/// Apply the configured level from each reloaded config until the channel closes.
///
/// Only `logging.level` is live-reloadable; other changes need a restart.
pub async fn apply_level_updates(
    mut updates: mpsc::UnboundedReceiver<ServerConfig>,
    level: AtomicLevel,
) {
    while let Some(config) = updates.recv().await {
        let new_level = config.logging.level;
        let old_level = level.swap(new_level);
        if old_level != new_level {
            metrics::record_level_change(new_level, &level);
            tracing::info!(from = %old_level, to = %new_level, "Log level reloaded from config");
        }
    }
}
