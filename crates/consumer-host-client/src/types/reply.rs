/*
[INPUT]:  Raw HTTP status and JSON body
[OUTPUT]: Discriminated ApiReply (payload or taxonomy error)
[POS]:    Data layer - response classification at the transport boundary
[UPDATE]: When error envelope shape changes
*/

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::error_code::ErrorCode;
use crate::http::{ConsumerHostError, Result};

fn unknown_code() -> ErrorCode {
    ErrorCode::Unknown(0)
}

// Non-string error payloads keep their JSON text.
fn error_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Error object returned by the consumer host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(default = "unknown_code")]
    pub code: ErrorCode,
    #[serde(deserialize_with = "error_text")]
    pub error: String,
}

impl ServiceError {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            code,
            error: error.into(),
        }
    }

    /// The synthetic "not login" error
    pub fn not_logged_in() -> Self {
        Self::new(ErrorCode::NotLoggedIn, ErrorCode::NotLoggedIn.message())
    }
}

/// Body of a reply: either the expected payload or a taxonomy error
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody<T> {
    Data(T),
    Error(ServiceError),
}

impl<T: DeserializeOwned> ApiBody<T> {
    /// Classify a JSON value.
    ///
    /// Any object carrying an `error` field is an error, whatever the status.
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        let is_error = value
            .as_object()
            .is_some_and(|object| object.contains_key("error"));

        if is_error {
            serde_json::from_value(value).map(ApiBody::Error)
        } else {
            serde_json::from_value(value).map(ApiBody::Data)
        }
    }
}

/// Raw reply handed back to callers, success or not
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply<T> {
    pub status: StatusCode,
    pub body: ApiBody<T>,
}

impl<T: DeserializeOwned> ApiReply<T> {
    /// Decode a reply from status and raw bytes.
    ///
    /// An empty body decodes as JSON `null`.
    pub fn decode(status: StatusCode, bytes: &[u8]) -> Result<Self> {
        let value = if bytes.trim_ascii().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(bytes).map_err(|_| {
                ConsumerHostError::invalid_response(status, String::from_utf8_lossy(bytes))
            })?
        };
        let body = ApiBody::from_value(value).map_err(|e| {
            ConsumerHostError::invalid_response(
                status,
                format!("{e}: {}", String::from_utf8_lossy(bytes)),
            )
        })?;
        Ok(Self { status, body })
    }
}

impl<T> ApiReply<T> {
    pub fn new(status: StatusCode, body: ApiBody<T>) -> Self {
        Self { status, body }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.body, ApiBody::Error(_))
    }

    pub fn error(&self) -> Option<&ServiceError> {
        match &self.body {
            ApiBody::Error(err) => Some(err),
            ApiBody::Data(_) => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match &self.body {
            ApiBody::Data(data) => Some(data),
            ApiBody::Error(_) => None,
        }
    }

    /// True when the server reported the synthetic "not login" code
    pub fn is_not_logged_in(&self) -> bool {
        self.error().is_some_and(|err| err.code.requires_login())
    }

    /// Collapse into a `Result`, turning taxonomy errors into `ConsumerHostError::Api`
    pub fn into_result(self) -> Result<T> {
        match self.body {
            ApiBody::Data(data) => Ok(data),
            ApiBody::Error(err) => Err(err.into()),
        }
    }
}
