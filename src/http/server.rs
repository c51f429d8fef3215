//! HTTP server setup and route composition.
//!
//! # Responsibilities
//! - Create the Axum router with public, protected, and static routes
//! - Wire up middleware (request ID, tracing, timeout, forwarding)
//! - Bind the server to a listener and serve with graceful shutdown
//!
//! # Middleware pipeline (outermost first)
//! ```text
//! request ID → trace → timeout → forward proxy → route table
//!                                                   ├── /api/register, /api/login
//!                                                   ├── auth gate → /api/address/*
//!                                                   └── /swagger/* (static files)
//! ```
//! Ordering is a contract: the forwarding decision runs before any token
//! check, so relayed traffic is never subject to this gateway's auth.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::post, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{gate, token::TokenCodec};
use crate::config::GatewayConfig;
use crate::geo::GeoProvider;
use crate::proxy::{self, ForwardError, ForwardProxy};
use crate::users::UserStore;

use super::handlers;

/// Application state injected into handlers and the auth gate.
#[derive(Clone)]
pub struct AppState {
    pub geo: Arc<dyn GeoProvider>,
    pub users: Arc<dyn UserStore>,
    pub tokens: Arc<TokenCodec>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new server from configuration and capability implementations.
    pub fn new(config: GatewayConfig, state: AppState) -> Result<Self, ForwardError> {
        let forward_proxy = ForwardProxy::new(&config.forward)?;
        let router = Self::build_router(&config, forward_proxy, state);
        Ok(Self { router, config })
    }

    fn build_router(config: &GatewayConfig, forward_proxy: ForwardProxy, state: AppState) -> Router {
        let protected = Router::new()
            .route("/api/address/search", post(handlers::search))
            .route("/api/address/geocode", post(handlers::geocode))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                gate::require_token,
            ));

        Router::new()
            .merge(protected)
            .route("/api/login", post(handlers::login))
            .route("/api/register", post(handlers::register))
            .nest_service("/swagger", ServeDir::new(&config.docs.dir))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(middleware::from_fn_with_state(forward_proxy, proxy::forward)),
            )
    }

    /// Run the server, accepting connections until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            forward_target = %format!("{}:{}", self.config.forward.host, self.config.forward.port),
            "gateway starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("gateway stopped");
        Ok(())
    }
}
