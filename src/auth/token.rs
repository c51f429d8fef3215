//! Signed access-token issuance and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of issued tokens. The cookie carrying the token uses the same
/// value so the transport-level expiry and the embedded claim agree.
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier (the authenticated email).
    pub sub: String,
    /// Issuance time, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Errors from token validation and issuance.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing access token")]
    MissingToken,

    #[error("access token expired")]
    Expired,

    #[error("invalid access token")]
    Invalid,

    #[error("failed to sign access token")]
    Signing,
}

/// Issues and verifies HS256-signed tokens with a single process-wide key.
///
/// The key is read-only after construction, so the codec is safe to share
/// across request tasks without synchronization.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a token for the given subject, expiring [`TOKEN_TTL_SECS`] from now.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        self.issue_with_ttl(subject, Duration::seconds(TOKEN_TTL_SECS))
    }

    fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::Signing)
    }

    /// Validate signature, structure, and expiry; return the claims on success.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid,
            })
    }
}
