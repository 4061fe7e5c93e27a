//! Output destinations for encoded log lines.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_appender::rolling::RollingFileAppender;

use crate::logger::error::LoggerError;
use crate::logger::options::FileRotation;

/// A destination for fully encoded log lines.
pub trait Sink: Send + Sync {
    /// Write one line. The line carries no trailing newline.
    fn write_line(&self, line: &str) -> io::Result<()>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    /// Whether the level should be ANSI-colored for this sink.
    fn highlights(&self) -> bool {
        false
    }
}

/// Standard output.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Sink for ConsoleSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }

    fn highlights(&self) -> bool {
        self.color
    }
}

/// Time-rotated log file backed by `tracing-appender`.
pub struct RollingFileSink {
    writer: Mutex<RollingFileAppender>,
}

impl RollingFileSink {
    /// Open (creating directories as needed) the rolling file described by `file`.
    ///
    /// The file stem becomes the rotated file prefix and the extension its suffix,
    /// so `/var/log/app.log` rotated daily yields `/var/log/app.2026-01-31.log`.
    pub fn open(file: &FileRotation) -> Result<Self, LoggerError> {
        let path = file.path.as_path();
        let stem = path
            .file_stem()
            .and_then(OsStr::to_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LoggerError::InvalidFilePath(path.to_path_buf()))?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|source| LoggerError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut builder = RollingFileAppender::builder()
            .rotation(file.rotation.into())
            .filename_prefix(stem);
        if let Some(ext) = path.extension().and_then(OsStr::to_str) {
            builder = builder.filename_suffix(ext);
        }
        if let Some(max) = file.max_files {
            builder = builder.max_log_files(max);
        }
        let appender = builder.build(dir)?;

        Ok(Self {
            writer: Mutex::new(appender),
        })
    }

    fn lock(&self) -> MutexGuard<'_, RollingFileAppender> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for RollingFileSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }

    fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// In-memory capture of every line written, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|l| l.contains(needle))
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}
