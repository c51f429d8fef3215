//! Token-based access control.
//!
//! # Data Flow
//! ```text
//! Login handler
//!     → token.rs (issue: sign subject + expiry)
//!     → cookie on the response
//!
//! Protected request
//!     → gate.rs (extract cookie, verify signature and expiry)
//!     → admit with subject in extensions, or reject with 403
//! ```
//!
//! # Design Decisions
//! - Tokens are stateless: validity is a function of signature and claims,
//!   there is no revocation list and no stored session
//! - The signing key is immutable process configuration, injected explicitly
//!   rather than read from a hidden singleton

pub mod gate;
pub mod token;

pub use gate::Subject;
pub use token::{AuthError, Claims, TokenCodec};
