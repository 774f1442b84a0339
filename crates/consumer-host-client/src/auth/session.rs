/*
[INPUT]:  Tokens produced by login or read from the token cache
[OUTPUT]: Per-request credentials (Authorization header values)
[POS]:    Auth layer - in-memory credential slot owned by AuthManager
[UPDATE]: When credential format or slot semantics change
*/

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// Token currently installed in the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub account: String,
    pub token: String,
    pub established_at: DateTime<Utc>,
}

/// Credential passed explicitly into each request function
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

/// Thread-safe single-slot credential holder
#[derive(Debug, Clone, Default)]
pub struct Session {
    data: Arc<RwLock<Option<SessionToken>>>,
}

impl Session {
    /// Create a new empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a token, replacing whatever was there
    pub fn set_token(&self, account: &str, token: String) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(SessionToken {
            account: account.to_string(),
            token,
            established_at: Utc::now(),
        });
    }

    /// Credential for the given account, if the slot holds one for it
    pub fn credential_for(&self, account: &str) -> Option<Credential> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|data| data.account == account)
            .map(|data| Credential::new(data.token.clone()))
    }

    /// Credential regardless of account
    pub fn credential(&self) -> Option<Credential> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|data| Credential::new(data.token.clone()))
    }

    /// Get token data if available
    pub fn token_data(&self) -> Option<SessionToken> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Account the current token belongs to
    pub fn account(&self) -> Option<String> {
        self.token_data().map(|data| data.account)
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}
