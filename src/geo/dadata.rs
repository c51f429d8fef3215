//! Client for the DaData address-suggestion API.
//!
//! # Responsibilities
//! - Build authenticated JSON POST requests (API key in `Authorization`)
//! - Decode the `{"suggestions": [...]}` response shape into `Address` values
//! - Classify failures as transport or decode errors
//!
//! # Design Decisions
//! - One outbound call per invocation, per-call timeout, no retries
//! - Coordinates are sent as strings; the provider decides their validity
//! - An empty suggestion list decodes to an empty result, not an error

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};

use crate::config::GeocoderConfig;

use super::{Address, GeoError, GeoProvider};

const SUGGEST_PATH: &str = "/suggest/address";
const GEOLOCATE_PATH: &str = "/geolocate/address";

/// HTTP client for the suggestion provider.
pub struct DadataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    query: &'a str,
}

#[derive(Debug, Serialize)]
struct GeolocatePayload<'a> {
    lat: &'a str,
    lon: &'a str,
}

/// Raw wire shape of a provider response.
#[derive(Debug, Serialize, Deserialize)]
struct SuggestionsResponse {
    suggestions: Vec<Suggestion>,
}

/// One provider suggestion, mapped 1:1 into an [`Address`].
#[derive(Debug, Serialize, Deserialize)]
struct Suggestion {
    value: String,
    #[serde(default)]
    data: SuggestionData,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SuggestionData {
    city: Option<String>,
    street: Option<String>,
    house: Option<String>,
    geo_lat: Option<String>,
    geo_lon: Option<String>,
}

impl From<Suggestion> for Address {
    fn from(suggestion: Suggestion) -> Self {
        Self {
            city: suggestion.data.city,
            street: suggestion.data.street,
            house: suggestion.data.house,
            geo_lat: suggestion.data.geo_lat,
            geo_lon: suggestion.data.geo_lon,
            value: suggestion.value,
        }
    }
}

impl DadataClient {
    /// Create a new client from configuration.
    pub fn new(config: &GeocoderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn post<T: Serialize>(&self, path: &str, payload: &T) -> Result<Vec<Address>, GeoError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .header(header::AUTHORIZATION, format!("Token {}", self.api_key))
            .header(header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| GeoError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Transport(format!(
                "provider returned status {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| GeoError::Transport(e.to_string()))?;

        decode_suggestions(&body)
    }
}

/// Decode a raw provider body into normalized addresses.
fn decode_suggestions(body: &[u8]) -> Result<Vec<Address>, GeoError> {
    let parsed: SuggestionsResponse =
        serde_json::from_slice(body).map_err(|e| GeoError::Decode(e.to_string()))?;
    Ok(parsed.suggestions.into_iter().map(Address::from).collect())
}

#[async_trait]
impl GeoProvider for DadataClient {
    async fn search(&self, query: &str) -> Result<Vec<Address>, GeoError> {
        self.post(SUGGEST_PATH, &SearchPayload { query }).await
    }

    async fn geocode(&self, lat: &str, lng: &str) -> Result<Vec<Address>, GeoError> {
        self.post(GEOLOCATE_PATH, &GeolocatePayload { lat, lon: lng })
            .await
    }
}
