//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::admin::STATUS_PATH;
use crate::config::schema::ServerConfig;
use crate::logger::options::validate_time_layout;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("{:?} is not a socket address", config.listener.bind_address),
        ));
    }

    let path = &config.level_endpoint.path;
    if !path.starts_with('/') || path.len() < 2 {
        errors.push(ValidationError::new(
            "level_endpoint.path",
            format!("{path:?} must start with '/' and name a route"),
        ));
    } else if path.contains(['{', '}', '*']) {
        errors.push(ValidationError::new(
            "level_endpoint.path",
            format!("{path:?} must be a literal path without captures or wildcards"),
        ));
    } else if path == STATUS_PATH {
        errors.push(ValidationError::new(
            "level_endpoint.path",
            format!("{path:?} is reserved for the status route"),
        ));
    }

    if let Some(key) = &config.level_endpoint.api_key {
        if key.trim().is_empty() {
            errors.push(ValidationError::new("level_endpoint.api_key", "must not be blank"));
        }
    }

    if let Err(e) = validate_time_layout(&config.logging.time_layout) {
        errors.push(ValidationError::new("logging.time_layout", e.to_string()));
    }

    if let Some(file) = &config.logging.file {
        if file.path.file_name().is_none() {
            errors.push(ValidationError::new("logging.file.path", "must name a file"));
        }
        if file.max_files == Some(0) {
            errors.push(ValidationError::new("logging.file.max_files", "must be at least 1"));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::FileRotation;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.level_endpoint.path = "loglevel".into();
        config.timeouts.request_secs = 0;
        config.logging.time_layout = "%".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "level_endpoint.path",
                "logging.time_layout",
                "timeouts.request_secs",
            ]
        );
    }

    #[test]
    fn test_endpoint_path_must_be_mountable() {
        for path in ["/status", "/a/{x", "/levels/{name}", "/log/*rest", "/x}"] {
            let mut config = ServerConfig::default();
            config.level_endpoint.path = path.into();
            let errors = validate_config(&config).unwrap_err();
            assert_eq!(errors.len(), 1, "{path}");
            assert_eq!(errors[0].field, "level_endpoint.path");
        }

        let mut config = ServerConfig::default();
        config.level_endpoint.path = "/admin/status".into();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_file_and_metrics_checks() {
        let mut config = ServerConfig::default();
        let mut file = FileRotation::new("/var/log/app.log");
        file.max_files = Some(0);
        config.logging.file = Some(file);
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "bad".into();
        config.level_endpoint.api_key = Some("  ".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].to_string().starts_with("level_endpoint.api_key"));
    }
}
