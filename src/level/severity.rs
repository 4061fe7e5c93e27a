//! Ordered log severities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Log importance, ordered from least to most severe.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Lowercase name used on the wire and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Map a `tracing` level onto a severity. TRACE has no counterpart.
    pub fn from_tracing(level: &tracing::Level) -> Option<Self> {
        match *level {
            tracing::Level::TRACE => None,
            tracing::Level::DEBUG => Some(Severity::Debug),
            tracing::Level::INFO => Some(Severity::Info),
            tracing::Level::WARN => Some(Severity::Warn),
            tracing::Level::ERROR => Some(Severity::Error),
        }
    }
}

impl From<u8> for Severity {
    fn from(val: u8) -> Self {
        match val {
            0 => Severity::Debug,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known severity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized level: {0:?}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);

        let mut sorted = Severity::ALL;
        sorted.sort();
        assert_eq!(sorted, Severity::ALL);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("DEBUG".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!(" Warn ".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("Fatal".parse::<Severity>().unwrap(), Severity::Fatal);

        let err = "bogus".parse::<Severity>().unwrap_err();
        assert_eq!(err, ParseSeverityError("bogus".into()));
        assert!("".parse::<Severity>().is_err());
        assert!("warning".parse::<Severity>().is_err());
    }

    #[test]
    fn test_u8_roundtrip() {
        for sev in Severity::ALL {
            assert_eq!(Severity::from(sev as u8), sev);
        }
    }

    #[test]
    fn test_tracing_mapping() {
        assert_eq!(Severity::from_tracing(&tracing::Level::TRACE), None);
        assert_eq!(Severity::from_tracing(&tracing::Level::DEBUG), Some(Severity::Debug));
        assert_eq!(Severity::from_tracing(&tracing::Level::ERROR), Some(Severity::Error));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "\"warn\"");
        let sev: Severity = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(sev, Severity::Error);
        assert!(serde_json::from_str::<Severity>("\"loud\"").is_err());
    }
}
