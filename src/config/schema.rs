//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, with
//! defaults matching the original deployment (companion backend `hugo_task`
//! on port 1313, DaData suggestion API).

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Forwarding target for the companion content service.
    pub forward: ForwardConfig,

    /// External geocoding provider.
    pub geocoder: GeocoderConfig,

    /// Token signing settings.
    pub auth: AuthConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Static documentation serving.
    pub docs: DocsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Forwarding target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardConfig {
    /// Companion backend host.
    pub host: String,

    /// Companion backend port.
    pub port: u16,

    /// Path prefixes served by this gateway itself; everything else is
    /// relayed to the companion backend.
    pub local_prefixes: Vec<String>,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            host: "hugo_task".to_string(),
            port: 1313,
            local_prefixes: vec!["/api".to_string(), "/swagger".to_string()],
        }
    }
}

/// Geocoding provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Base URL of the suggestion API.
    pub base_url: String,

    /// API-key credential sent in the authorization header.
    pub api_key: String,

    /// Per-call timeout in seconds for outbound provider requests.
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://suggestions.dadata.ru/suggestions/api/4_1/rs".to_string(),
            api_key: String::new(),
            timeout_secs: 15,
        }
    }
}

/// Token signing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC signing key for access tokens.
    pub signing_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // WARNING: This is a placeholder! Change this in production.
            signing_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Static documentation serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Directory served under `/swagger`.
    pub dir: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: "swagger".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.forward.host, "hugo_task");
        assert_eq!(config.forward.port, 1313);
        assert!(config.forward.local_prefixes.contains(&"/api".to_string()));
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [forward]
            host = "content.internal"
            port = 8000

            [geocoder]
            api_key = "k"
            "#,
        )
        .unwrap();

        assert_eq!(config.forward.host, "content.internal");
        assert_eq!(config.forward.port, 8000);
        assert_eq!(config.geocoder.api_key, "k");
        // Untouched sections keep their defaults.
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.geocoder.timeout_secs, 15);
    }
}
