//! Shared utilities for gateway integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use geo_gateway::auth::token::TokenCodec;
use geo_gateway::config::GatewayConfig;
use geo_gateway::geo::{Address, DadataClient, GeoError, GeoProvider};
use geo_gateway::http::{AppState, HttpServer};
use geo_gateway::lifecycle::Shutdown;
use geo_gateway::users::{MemoryUserStore, UserError, UserStore};

pub const TEST_SIGNING_KEY: &str = "integration-test-signing-key";

fn suggestion(value: &str, city: &str) -> Value {
    json!({
        "value": value,
        "data": {
            "city": city,
            "street": "Sukhonskaya",
            "house": "11",
            "geo_lat": "55.878",
            "geo_lon": "37.653"
        }
    })
}

async fn suggest(Json(body): Json<Value>) -> Json<Value> {
    let query = body
        .get("query")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if query.is_empty() || query.contains("nowhere") {
        return Json(json!({ "suggestions": [] }));
    }
    Json(json!({ "suggestions": [suggestion(query, "Moscow")] }))
}

async fn geolocate(Json(body): Json<Value>) -> Json<Value> {
    let lat = body.get("lat").and_then(Value::as_str).unwrap_or_default();
    let lon = body.get("lon").and_then(Value::as_str).unwrap_or_default();
    if lat.parse::<f64>().is_err() || lon.parse::<f64>().is_err() {
        return Json(json!({ "suggestions": [] }));
    }
    Json(json!({ "suggestions": [suggestion(&format!("{lat},{lon}"), "Moscow")] }))
}

/// Start a mock suggestion provider on an ephemeral port.
///
/// Echoes the query back as a single Moscow suggestion; queries containing
/// "nowhere", empty queries, and unparseable coordinates yield no matches.
pub async fn start_mock_provider() -> SocketAddr {
    let app = Router::new()
        .route("/suggest/address", post(suggest))
        .route("/geolocate/address", post(geolocate));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a mock companion backend that returns a fixed response.
pub async fn start_mock_backend(status: u16, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;

                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
    addr
}

/// A running gateway bound to an ephemeral port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn spawn_gateway(config: GatewayConfig, state: AppState) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config, state).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestGateway { addr, shutdown }
}

/// Config pointing at the given mock provider; the forward target defaults
/// to a closed port so forwarding tests must set it explicitly.
pub fn test_config(provider: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.forward.host = "127.0.0.1".to_string();
    config.forward.port = 1;
    config.geocoder.base_url = format!("http://{provider}");
    config.geocoder.api_key = "test-key".to_string();
    config.geocoder.timeout_secs = 5;
    config.auth.signing_key = TEST_SIGNING_KEY.to_string();
    config
}

pub fn test_state(config: &GatewayConfig) -> AppState {
    AppState {
        geo: Arc::new(DadataClient::new(&config.geocoder)),
        users: Arc::new(MemoryUserStore::default()),
        tokens: Arc::new(TokenCodec::new(config.auth.signing_key.as_bytes())),
    }
}

/// Credential store that fails every operation.
pub struct FailingUserStore;

impl UserStore for FailingUserStore {
    fn insert(&self, _email: &str, _password: &str) -> Result<(), UserError> {
        Err(UserError::Store("backing store offline".to_string()))
    }

    fn authenticate(&self, _email: &str, _password: &str) -> Result<(), UserError> {
        Err(UserError::Store("backing store offline".to_string()))
    }
}

/// Geo provider double that records how often it is invoked.
#[derive(Default)]
pub struct CountingGeo {
    pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl GeoProvider for CountingGeo {
    async fn search(&self, query: &str) -> Result<Vec<Address>, GeoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Address {
            city: Some("Moscow".to_string()),
            street: None,
            house: None,
            geo_lat: None,
            geo_lon: None,
            value: query.to_string(),
        }])
    }

    async fn geocode(&self, lat: &str, lng: &str) -> Result<Vec<Address>, GeoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Address {
            city: Some("Moscow".to_string()),
            street: None,
            house: None,
            geo_lat: Some(lat.to_string()),
            geo_lon: Some(lng.to_string()),
            value: format!("{lat},{lng}"),
        }])
    }
}

/// Issue a token signed with the test key.
pub fn issue_test_token(subject: &str) -> String {
    TokenCodec::new(TEST_SIGNING_KEY.as_bytes())
        .issue(subject)
        .unwrap()
}

pub fn jwt_cookie(token: &str) -> String {
    format!("jwt={token}")
}
