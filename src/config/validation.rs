//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports, timeouts) and required fields
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// One failed semantic check.
#[derive(Debug, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

fn error(field: &'static str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field,
        message: message.into(),
    }
}

/// Validate a loaded configuration, collecting every failure.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.is_empty() {
        errors.push(error("listener.bind_address", "must not be empty"));
    }
    if config.forward.host.is_empty() {
        errors.push(error("forward.host", "must not be empty"));
    }
    if config.forward.port == 0 {
        errors.push(error("forward.port", "must not be zero"));
    }
    for prefix in &config.forward.local_prefixes {
        if !prefix.starts_with('/') {
            errors.push(error(
                "forward.local_prefixes",
                format!("prefix {prefix:?} must start with '/'"),
            ));
        }
    }
    if !config.geocoder.base_url.starts_with("http://")
        && !config.geocoder.base_url.starts_with("https://")
    {
        errors.push(error("geocoder.base_url", "must be an http(s) URL"));
    }
    if config.geocoder.timeout_secs == 0 {
        errors.push(error("geocoder.timeout_secs", "must not be zero"));
    }
    if config.auth.signing_key.is_empty() {
        errors.push(error("auth.signing_key", "must not be empty"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(error("timeouts.request_secs", "must not be zero"));
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
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut config = GatewayConfig::default();
        config.forward.host.clear();
        config.forward.port = 0;
        config.auth.signing_key.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_relative_local_prefix_is_rejected() {
        let mut config = GatewayConfig::default();
        config.forward.local_prefixes.push("api".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "forward.local_prefixes");
    }

    #[test]
    fn test_non_http_base_url_is_rejected() {
        let mut config = GatewayConfig::default();
        config.geocoder.base_url = "ftp://example.com".to_string();

        assert!(validate_config(&config).is_err());
    }
}
