/*
[INPUT]:  Error sources (HTTP, server taxonomy, wallet, token storage)
[OUTPUT]: Structured error types with auth hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::{ErrorCode, ServiceError};

/// Main error type for the consumer host client
#[derive(Error, Debug)]
pub enum ConsumerHostError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a taxonomy error
    #[error("API error (code {code}): {message}")]
    Api { code: ErrorCode, message: String },

    /// The wallet refused to produce a signature
    #[error("Signature rejected: {message}")]
    SignatureRejected { message: String },

    /// Authentication failed for a reason other than a rejected signature
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Body was neither the expected payload nor a taxonomy error
    #[error("Invalid response (status {status}): {body}")]
    InvalidResponse { status: u16, body: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token cache could not be read or written
    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// No wallet is connected
    #[error("No wallet connected")]
    NotConnected,
}

impl ConsumerHostError {
    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ConsumerHostError::SignatureRejected { .. }
                | ConsumerHostError::Authentication { .. }
                | ConsumerHostError::NotConnected
                | ConsumerHostError::Api {
                    code: ErrorCode::NotLoggedIn,
                    ..
                }
        )
    }

    /// Create an invalid response error from a status and raw body
    pub fn invalid_response(status: StatusCode, body: impl Into<String>) -> Self {
        ConsumerHostError::InvalidResponse {
            status: status.as_u16(),
            body: body.into(),
        }
    }
}

impl From<ServiceError> for ConsumerHostError {
    fn from(err: ServiceError) -> Self {
        ConsumerHostError::Api {
            code: err.code,
            message: err.error,
        }
    }
}

/// Result type alias for consumer host operations
pub type Result<T> = std::result::Result<T, ConsumerHostError>;
