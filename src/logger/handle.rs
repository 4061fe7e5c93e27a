//! The structured logger.
//!
//! # Responsibilities
//! - Decide per call whether a record passes the shared threshold
//! - Encode records as single-line JSON objects
//! - Fan records out to every configured sink
//!
//! # Design Decisions
//! - The threshold is read from the [`AtomicLevel`] on every call, never cached
//! - Encoding happens once per record; only the level token differs per sink
//! - Sink failures are reported through `tracing` and never reach the caller

use std::fmt;
use std::io;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::level::{AtomicLevel, Severity};
use crate::logger::field::Field;
use crate::logger::options::DEFAULT_TIME_LAYOUT;
use crate::logger::sink::{ConsoleSink, Sink};

/// Keys written by the logger itself. User fields with these names are
/// recorded as `fields.<key>` instead.
const RESERVED_KEYS: [&str; 4] = ["level", "time", "logger", "msg"];

struct Shared {
    level: AtomicLevel,
    sinks: Vec<Arc<dyn Sink>>,
    time_layout: String,
}

/// Handle to a structured logger. Cloning is cheap and shares everything.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    name: Option<Arc<str>>,
    fields: Arc<[Field]>,
}

impl Logger {
    pub(crate) fn from_parts(
        level: AtomicLevel,
        sinks: Vec<Arc<dyn Sink>>,
        time_layout: String,
        name: Option<String>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                level,
                sinks,
                time_layout,
            }),
            name: name.map(Arc::from),
            fields: Arc::from(Vec::new()),
        }
    }

    /// Plain stdout logger controlled by `level`.
    pub fn console(level: AtomicLevel) -> Self {
        let stdout: Arc<dyn Sink> = Arc::new(ConsoleSink::default());
        Self::from_parts(
            level,
            vec![stdout],
            DEFAULT_TIME_LAYOUT.to_string(),
            None,
        )
    }

    /// The threshold cell this logger consults.
    pub fn level(&self) -> &AtomicLevel {
        &self.shared.level
    }

    pub fn enabled(&self, level: Severity) -> bool {
        self.shared.level.enabled(level)
    }

    /// Child logger that adds `fields` to every record.
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Logger {
        let fields: Vec<Field> = self.fields.iter().cloned().chain(fields).collect();
        Logger {
            shared: self.shared.clone(),
            name: self.name.clone(),
            fields: Arc::from(fields),
        }
    }

    /// Child logger whose name is appended to this one's, dot-separated.
    pub fn named(&self, name: &str) -> Logger {
        let name = match &self.name {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_string(),
        };
        Logger {
            shared: self.shared.clone(),
            name: Some(Arc::from(name)),
            fields: self.fields.clone(),
        }
    }

    pub fn log(&self, level: Severity, msg: &str, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }

        let body = self.encode_body(msg, fields);
        for sink in &self.shared.sinks {
            let line = render_line(level, &body, sink.highlights());
            if let Err(e) = sink.write_line(&line) {
                tracing::warn!(error = %e, "Failed to write log record");
            }
        }
    }

    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Debug, msg, fields);
    }

    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Info, msg, fields);
    }

    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Warn, msg, fields);
    }

    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Error, msg, fields);
    }

    /// Record at fatal severity and flush. The process keeps running;
    /// terminating is left to the caller.
    pub fn fatal(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Fatal, msg, fields);
        if let Err(e) = self.sync() {
            tracing::warn!(error = %e, "Failed to flush log sinks");
        }
    }

    /// Flush every sink, reporting the first failure.
    pub fn sync(&self) -> io::Result<()> {
        let mut first_err = None;
        for sink in &self.shared.sinks {
            if let Err(e) = sink.flush() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Everything after the level: `"time":…,"logger":…,"msg":…,fields…}`.
    fn encode_body(&self, msg: &str, fields: &[Field]) -> String {
        let mut record = Map::new();
        let time = chrono::Local::now().format(&self.shared.time_layout);
        record.insert("time".into(), Value::String(time.to_string()));
        if let Some(name) = &self.name {
            record.insert("logger".into(), Value::String(name.to_string()));
        }
        record.insert("msg".into(), Value::String(msg.to_string()));
        for f in self.fields.iter().chain(fields) {
            let key = if RESERVED_KEYS.contains(&f.key.as_str()) {
                format!("fields.{}", f.key)
            } else {
                f.key.clone()
            };
            record.insert(key, f.value.clone());
        }

        let encoded = Value::Object(record).to_string();
        // Strip the opening brace; render_line puts the level first.
        encoded[1..].to_string()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.shared.level)
            .field("name", &self.name)
            .field("sinks", &self.shared.sinks.len())
            .finish()
    }
}

fn render_line(level: Severity, body: &str, highlight: bool) -> String {
    if highlight {
        format!(
            "{{\"level\":\"{}{}\x1b[0m\",{}",
            color_code(level),
            level.as_str().to_ascii_uppercase(),
            body
        )
    } else {
        format!("{{\"level\":\"{}\",{}", level.as_str(), body)
    }
}

fn color_code(level: Severity) -> &'static str {
    match level {
        Severity::Debug => "\x1b[35m",
        Severity::Info => "\x1b[34m",
        Severity::Warn => "\x1b[33m",
        Severity::Error | Severity::Fatal => "\x1b[31m",
    }
}
