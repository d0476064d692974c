//! Operator sign-in.
//!
//! Credentials are checked by a [`CredentialChecker`], an external collaborator the
//! front-end receives at startup. The crate ships [`StaticCredentialChecker`], a
//! placeholder that compares against accounts supplied through the environment; it is not
//! a security boundary and real deployments should plug in their own checker.

use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info};

/// A signed-in operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// Username as stored by the checker
    pub username: String,
}

/// Verifies a username/password pair.
///
/// # Contract
///
/// Implementations must:
/// - Return the operator when the pair is accepted
/// - Return [`Error::InvalidCredentials`] when it is rejected
/// - Return [`Error::CredentialService`] when they cannot decide
#[async_trait]
pub trait CredentialChecker: Send + Sync {
    /// Checks `password` for `username`.
    async fn verify(&self, username: &str, password: &str) -> Result<Operator>;
}

/// Rejects the attempt before contacting any checker when a field is empty.
///
/// # Errors
/// Returns [`Error::Validation`] if either field is empty.
pub fn validate_login_fields(username: &str, password: &str) -> Result<()> {
    if username.is_empty() || password.is_empty() {
        return Err(Error::validation("Please fill in all fields"));
    }
    Ok(())
}

/// Accounts held in memory. Usernames compare case-insensitively, passwords exactly.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialChecker {
    accounts: HashMap<String, String>,
}

impl StaticCredentialChecker {
    /// A checker with no accounts; every attempt fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registers an account, replacing any with the same username.
    #[must_use]
    pub fn with_account(mut self, username: &str, password: &str) -> Self {
        self.accounts
            .insert(username.to_lowercase(), password.to_string());
        self
    }

    /// Whether no account is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl CredentialChecker for StaticCredentialChecker {
    async fn verify(&self, username: &str, password: &str) -> Result<Operator> {
        let key = username.to_lowercase();
        match self.accounts.get(&key) {
            Some(expected) if expected == password => {
                info!("Operator '{}' signed in", key);
                Ok(Operator { username: key })
            }
            _ => {
                debug!("Rejected sign-in for '{}'", username);
                Err(Error::InvalidCredentials)
            }
        }
    }
}
