//! Request forwarding to the companion content service.
//!
//! # Responsibilities
//! - Decide per request, before any auth check, whether the target resource
//!   belongs to the companion backend
//! - Rewrite the destination (scheme, authority, host header) and relay the
//!   request with method, headers, and body intact
//! - Propagate the upstream response verbatim, including non-2xx statuses
//! - Surface an unreachable backend as a gateway failure, never a silent
//!   fall-through to local handlers
//!
//! # Design Decisions
//! - Single static (host, port) target; no pool, no health checking
//! - Path-prefix decision with AND-nothing-else semantics: anything outside
//!   the gateway-local prefixes is relayed
//! - The relay holds no state across requests

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        header,
        uri::{Authority, PathAndQuery, Scheme},
        HeaderValue, StatusCode, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

use crate::config::ForwardConfig;

/// Errors from the forwarding stage.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid forward target {0:?}")]
    BadTarget(String),

    #[error("companion backend unreachable: {0}")]
    Unreachable(String),
}

/// First middleware stage: relays matching requests to one fixed backend.
#[derive(Clone)]
pub struct ForwardProxy {
    client: Client<HttpConnector, Body>,
    authority: Authority,
    local_prefixes: Arc<[String]>,
}

impl ForwardProxy {
    pub fn new(config: &ForwardConfig) -> Result<Self, ForwardError> {
        let target = format!("{}:{}", config.host, config.port);
        let authority =
            Authority::from_str(&target).map_err(|_| ForwardError::BadTarget(target))?;

        Ok(Self {
            client: Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
            authority,
            local_prefixes: config.local_prefixes.clone().into(),
        })
    }

    /// True when the path belongs to this gateway's own route table.
    pub fn is_local(&self, path: &str) -> bool {
        self.local_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn target(&self) -> &Authority {
        &self.authority
    }

    /// Rewrite the destination and relay one request, copying the upstream
    /// response back as-is.
    async fn relay(&self, request: Request) -> Result<Response, ForwardError> {
        let (mut parts, body) = request.into_parts();

        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.scheme = Some(Scheme::HTTP);
        uri_parts.authority = Some(self.authority.clone());
        if uri_parts.path_and_query.is_none() {
            uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        parts.uri =
            Uri::from_parts(uri_parts).map_err(|e| ForwardError::BadTarget(e.to_string()))?;

        let host = HeaderValue::from_str(self.authority.as_str())
            .map_err(|e| ForwardError::BadTarget(e.to_string()))?;
        parts.headers.insert(header::HOST, host);

        let outbound = Request::from_parts(parts, body);
        let response = self
            .client
            .request(outbound)
            .await
            .map_err(|e| ForwardError::Unreachable(e.to_string()))?;

        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

/// Middleware entry point. Runs before authentication: forwarded traffic is
/// never subject to this gateway's token validation.
pub async fn forward(
    State(proxy): State<ForwardProxy>,
    request: Request,
    next: Next,
) -> Response {
    if proxy.is_local(request.uri().path()) {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match proxy.relay(request).await {
        Ok(response) => {
            tracing::debug!(
                method = %method,
                path = %path,
                target = %proxy.authority,
                status = %response.status(),
                "relayed to companion backend"
            );
            response
        }
        Err(err) => {
            tracing::error!(
                method = %method,
                path = %path,
                target = %proxy.authority,
                error = %err,
                "forwarding failed"
            );
            (StatusCode::BAD_GATEWAY, "companion backend unavailable").into_response()
        }
    }
}
