//! Credential store capability.
//!
//! Credential storage and password verification are external collaborators of
//! the gateway: handlers depend only on the [`UserStore`] trait. The in-memory
//! implementation backs the default binary and tests; production deployments
//! plug in their own store (hashing included) behind the same interface.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Errors from credential operations.
///
/// The two known authentication failures are distinguished so the login
/// handler can report them; everything else is an opaque store failure.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("user doesn't exist")]
    UnknownUser,

    #[error("wrong password")]
    WrongPassword,

    #[error("user store failure: {0}")]
    Store(String),
}

/// Capability interface over credential storage.
pub trait UserStore: Send + Sync {
    fn insert(&self, email: &str, password: &str) -> Result<(), UserError>;
    fn authenticate(&self, email: &str, password: &str) -> Result<(), UserError>;
}

/// Process-local store keyed by email.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, String>>,
}

impl UserStore for MemoryUserStore {
    fn insert(&self, email: &str, password: &str) -> Result<(), UserError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| UserError::Store("poisoned lock".to_string()))?;
        if users.contains_key(email) {
            return Err(UserError::Store("email already registered".to_string()));
        }
        users.insert(email.to_string(), password.to_string());
        Ok(())
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<(), UserError> {
        let users = self
            .users
            .lock()
            .map_err(|_| UserError::Store("poisoned lock".to_string()))?;
        match users.get(email) {
            None => Err(UserError::UnknownUser),
            Some(stored) if stored == password => Ok(()),
            Some(_) => Err(UserError::WrongPassword),
        }
    }
}
