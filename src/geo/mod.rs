//! Geocoding subsystem.
//!
//! # Data Flow
//! ```text
//! Handler (search query or coordinate pair)
//!     → GeoProvider trait (capability seam, mockable)
//!     → dadata.rs (request construction, auth header, JSON decode)
//!     → Return: Vec<Address> or GeoError
//! ```
//!
//! # Design Decisions
//! - The provider is the source of truth: empty/invalid input is sent as-is
//!   and a "no match" answer is an empty list, never an error
//! - Two-variant error taxonomy: transport (network, non-2xx) and decode
//! - No retries and no caching; every call is a fresh round-trip

pub mod dadata;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dadata::DadataClient;

/// Normalized address record produced from one provider suggestion.
///
/// Immutable once constructed; the caller owns the returned values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub street: Option<String>,
    pub house: Option<String>,
    pub geo_lat: Option<String>,
    pub geo_lon: Option<String>,
    /// Raw suggestion text, retained for display.
    pub value: String,
}

/// Errors that can occur while talking to the geocoding provider.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Network failure or a non-2xx provider status.
    #[error("provider request failed: {0}")]
    Transport(String),

    /// Response body did not match the expected shape.
    #[error("failed to decode provider response: {0}")]
    Decode(String),
}

/// Capability interface over the external geocoding backend.
///
/// Handlers depend on this trait so tests can substitute deterministic
/// doubles without touching gateway logic.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Resolve a free-text query into zero or more addresses.
    ///
    /// An empty query is forwarded unchanged; the provider defines its own
    /// empty-result semantics.
    async fn search(&self, query: &str) -> Result<Vec<Address>, GeoError>;

    /// Resolve a latitude/longitude pair into zero or more addresses.
    ///
    /// Coordinates are untrusted strings. A syntactically invalid pair is
    /// expected to come back as zero results, keeping behavior uniform with
    /// provider-side "no match".
    async fn geocode(&self, lat: &str, lng: &str) -> Result<Vec<Address>, GeoError>;
}
