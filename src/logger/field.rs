//! Structured key/value context attached to log records.

use std::error::Error;

use serde::Serialize;
use serde_json::Value;

/// One key/value pair rendered into a JSON log record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Serialize an arbitrary value. Values serde cannot represent are
    /// recorded as a descriptive string instead of being dropped.
    pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| Value::String(format!("<unserializable: {e}>")));
        Self {
            key: key.into(),
            value,
        }
    }

    /// The error's display text under the `error` key.
    pub fn error(err: &(dyn Error + 'static)) -> Self {
        Self::new("error", err.to_string())
    }
}

/// Shorthand for [`Field::new`].
pub fn field(key: impl Into<String>, value: impl Into<Value>) -> Field {
    Field::new(key, value)
}

/// Collect an optional error and a set of metadata pairs into one field list.
/// The error, when present, comes first.
pub fn wrap_meta(
    err: Option<&(dyn Error + 'static)>,
    metas: impl IntoIterator<Item = Field>,
) -> Vec<Field> {
    err.map(Field::error).into_iter().chain(metas).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_wrap_meta_without_error() {
        let fields = wrap_meta(None, [field("para1", "value1"), field("para2", "value2")]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], Field::new("para1", "value1"));
    }

    #[test]
    fn test_wrap_meta_puts_error_first() {
        let err = io::Error::new(io::ErrorKind::Other, "pkg error");
        let fields = wrap_meta(Some(&err), [field("para1", "value1")]);
        assert_eq!(fields[0].key, "error");
        assert_eq!(fields[0].value, Value::String("pkg error".into()));
        assert_eq!(fields[1].key, "para1");
    }

    #[test]
    fn test_any_serializes_structs() {
        #[derive(Serialize)]
        struct Peer {
            host: &'static str,
            port: u16,
        }
        let f = Field::any("peer", &Peer { host: "10.0.0.1", port: 443 });
        assert_eq!(f.value["port"], 443);
    }
}
