//! Admission middleware for protected routes.
//!
//! State machine per request: token extracted from the cookie, verified by
//! the codec, then the subject is attached and the downstream handler runs.
//! Rejection at any step produces 403 and the handler is never invoked.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::http::server::AppState;

use super::token::AuthError;

/// Cookie that carries the access token.
pub const TOKEN_COOKIE: &str = "jwt";

/// Validated token subject, inserted into request extensions on admission.
#[derive(Debug, Clone)]
pub struct Subject(pub String);

pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = request.uri().path().to_string();

    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| cookie_value(h, TOKEN_COOKIE));

    let Some(token) = token else {
        tracing::warn!(path = %path, error = %AuthError::MissingToken, "request rejected");
        return Err(StatusCode::FORBIDDEN);
    };

    match state.tokens.verify(&token) {
        Ok(claims) => {
            request.extensions_mut().insert(Subject(claims.sub));
            Ok(next.run(request).await)
        }
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "request rejected");
            Err(StatusCode::FORBIDDEN)
        }
    }
}

/// Extract a named cookie value from a `Cookie` header.
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
