//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware pipeline)
//!     → [forward proxy may relay the request elsewhere]
//!     → [auth gate admits or rejects protected routes]
//!     → handlers.rs (decode input, call capabilities, map errors)
//!     → Send to client
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
