//! Logger configuration and builder.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing_appender::rolling::Rotation;

use crate::level::{AtomicLevel, Severity};
use crate::logger::handle::Logger;
use crate::logger::error::LoggerError;
use crate::logger::global;
use crate::logger::sink::{ConsoleSink, RollingFileSink, Sink};

/// RFC 3339 with milliseconds.
pub const DEFAULT_TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Initial minimum severity.
    pub level: Severity,

    /// Optional rotating log file.
    pub file: Option<FileRotation>,

    /// Suppress the stdout sink.
    pub disable_console: bool,

    /// chrono strftime layout for the `time` key.
    pub time_layout: String,

    /// ANSI-color the level on the console.
    pub highlighting: bool,

    /// Logger name recorded under the `logger` key.
    pub name: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            file: None,
            disable_console: false,
            time_layout: DEFAULT_TIME_LAYOUT.to_string(),
            highlighting: false,
            name: None,
        }
    }
}

impl LoggerConfig {
    /// Checks that can be made without touching the filesystem.
    pub fn validate(&self) -> Result<(), LoggerError> {
        validate_time_layout(&self.time_layout)?;
        if let Some(file) = &self.file {
            if file.path.file_name().is_none() {
                return Err(LoggerError::InvalidFilePath(file.path.clone()));
            }
        }
        Ok(())
    }
}

/// Reject layouts chrono cannot render.
pub fn validate_time_layout(layout: &str) -> Result<(), LoggerError> {
    if layout.is_empty() || StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::InvalidTimeLayout(layout.to_string()));
    }
    Ok(())
}

/// Rotating file destination.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FileRotation {
    pub path: PathBuf,

    #[serde(default)]
    pub rotation: RotationPolicy,

    /// Oldest rotated files beyond this count are deleted.
    #[serde(default)]
    pub max_files: Option<usize>,
}

impl FileRotation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rotation: RotationPolicy::default(),
            max_files: None,
        }
    }
}

/// How often the log file rolls over.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<RotationPolicy> for Rotation {
    fn from(policy: RotationPolicy) -> Self {
        match policy {
            RotationPolicy::Minutely => Rotation::MINUTELY,
            RotationPolicy::Hourly => Rotation::HOURLY,
            RotationPolicy::Daily => Rotation::DAILY,
            RotationPolicy::Never => Rotation::NEVER,
        }
    }
}

/// Builds a [`Logger`] from named options.
///
/// ```no_run
/// use dynlog::logger::LoggerBuilder;
///
/// let logger = LoggerBuilder::new()
///     .debug_level()
///     .file_rotation("/var/log/app/test.log")
///     .disable_console()
///     .time_layout("%Y-%m-%d %H:%M:%S")
///     .highlighting()
///     .build()?;
/// # Ok::<(), dynlog::logger::LoggerError>(())
/// ```
#[derive(Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    shared_level: Option<AtomicLevel>,
    extra_sinks: Vec<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn level(mut self, level: Severity) -> Self {
        self.config.level = level;
        self
    }

    pub fn debug_level(self) -> Self {
        self.level(Severity::Debug)
    }

    /// Write to a daily-rotated file at `path` in addition to the console.
    pub fn file_rotation(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file = Some(FileRotation::new(path));
        self
    }

    /// Rotation period for the file set by [`file_rotation`](Self::file_rotation).
    pub fn rotation(mut self, policy: RotationPolicy) -> Self {
        if let Some(file) = self.config.file.as_mut() {
            file.rotation = policy;
        }
        self
    }

    /// Retention for the file set by [`file_rotation`](Self::file_rotation).
    pub fn max_files(mut self, count: usize) -> Self {
        if let Some(file) = self.config.file.as_mut() {
            file.max_files = Some(count);
        }
        self
    }

    pub fn disable_console(mut self) -> Self {
        self.config.disable_console = true;
        self
    }

    pub fn time_layout(mut self, layout: impl Into<String>) -> Self {
        self.config.time_layout = layout.into();
        self
    }

    pub fn highlighting(mut self) -> Self {
        self.config.highlighting = true;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Use an existing threshold cell instead of creating one.
    ///
    /// The cell keeps its current value; the configured `level` is ignored.
    pub fn shared_level(mut self, level: AtomicLevel) -> Self {
        self.shared_level = Some(level);
        self
    }

    /// Add a sink alongside the configured console/file sinks.
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.extra_sinks.push(sink);
        self
    }

    pub fn build(self) -> Result<Logger, LoggerError> {
        self.config.validate()?;

        let level = self
            .shared_level
            .unwrap_or_else(|| AtomicLevel::new(self.config.level));

        let mut sinks: Vec<Arc<dyn Sink>> = Vec::new();
        if !self.config.disable_console {
            sinks.push(Arc::new(ConsoleSink::new(self.config.highlighting)));
        }
        if let Some(file) = &self.config.file {
            sinks.push(Arc::new(RollingFileSink::open(file)?));
        }
        sinks.extend(self.extra_sinks);

        Ok(Logger::from_parts(
            level,
            sinks,
            self.config.time_layout,
            self.config.name,
        ))
    }

    /// Build and install as the process-wide default logger.
    pub fn build_global(self) -> Result<Logger, LoggerError> {
        let logger = self.build()?;
        global::set_default(logger.clone());
        Ok(logger)
    }
}
