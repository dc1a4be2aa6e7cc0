//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that parse but cannot
//! work (unparseable addresses, zero timeouts, a suffix that no path could
//! end with). All problems are collected rather than stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ConverterConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `listener.bind_address`.
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

/// Validate a parsed configuration, returning every error found.
pub fn validate_config(config: &ConverterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address: {}", config.listener.bind_address, e),
        ));
    }

    let suffix = &config.routes.convert_suffix;
    if !suffix.starts_with('/') || suffix.len() < 2 {
        errors.push(ValidationError::new(
            "routes.convert_suffix",
            format!("'{}' must start with '/' and name a path segment", suffix),
        ));
    }

    if config.conversion.header_prefix.is_empty() {
        errors.push(ValidationError::new(
            "conversion.header_prefix",
            "must not be empty, otherwise every query parameter becomes a header",
        ));
    }

    if config.conversion.remarks_title.contains(['\r', '\n']) {
        errors.push(ValidationError::new(
            "conversion.remarks_title",
            "must fit on a single line",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than 0"));
    }

    let obs = &config.observability;
    if obs.metrics_enabled {
        if let Err(e) = obs.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("'{}' is not a socket address: {}", obs.metrics_address, e),
            ));
        }
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

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ConverterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ConverterConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.routes.convert_suffix = "convert".into();
        config.conversion.header_prefix = String::new();
        config.conversion.remarks_title = "two\nlines".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "routes.convert_suffix",
                "conversion.header_prefix",
                "conversion.remarks_title",
                "timeouts.request_secs",
            ]
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ConverterConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
    }

    #[test]
    fn test_bare_slash_suffix_rejected() {
        let mut config = ConverterConfig::default();
        config.routes.convert_suffix = "/".into();
        assert!(validate_config(&config).is_err());
    }
}
