//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Initialize capabilities → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     SIGINT/SIGTERM → broadcast to tasks → stop accepting → drain → exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
