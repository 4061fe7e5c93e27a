//! Logger construction errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a logger could not be built.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file path {0:?} does not name a file")]
    InvalidFilePath(PathBuf),

    #[error("failed to create log directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open rolling log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    #[error("invalid time layout {0:?}")]
    InvalidTimeLayout(String),
}
