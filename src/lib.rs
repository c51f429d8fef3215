//! Gateway in front of a companion content service and an external
//! address-suggestion provider.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!                 │                    GATEWAY                        │
//!  Client ───────▶│  proxy (forward?) ──▶ http (routes)               │
//!                 │        │                 ├─ public: register/login│
//!                 │        ▼                 ├─ auth gate ─ address/* │──▶ geocoding
//!                 │  companion backend       └─ /swagger static       │    provider
//!                 │                                                   │
//!                 │  cross-cutting: config · lifecycle · tracing      │
//!                 └──────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod geo;
pub mod http;
pub mod proxy;

// Access control
pub mod auth;
pub mod users;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::GatewayConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
