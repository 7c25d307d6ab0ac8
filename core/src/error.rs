//! Error types shared by the gateway and the session store

use thiserror::Error;

/// Message used when a failed response carries no `error` field
pub const GENERIC_FAILURE: &str = "API request failed";

/// The single failure kind surfaced by every API call.
///
/// `status` is set when the server answered with a non-success code and is
/// `None` for transport or decoding failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestFailed {
    pub message: String,
    pub status: Option<u16>,
}

impl RequestFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Build the error for a non-success response from its decoded body
    pub fn from_body(status: u16, body: &serde_json::Value) -> Self {
        let message = body
            .get("error")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(GENERIC_FAILURE);
        Self::with_status(message, status)
    }
}

impl From<reqwest::Error> for RequestFailed {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

impl From<SessionError> for RequestFailed {
    fn from(err: SessionError) -> Self {
        Self::new(err.to_string())
    }
}

/// Failures of the persistent session store
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session record: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T, E = RequestFailed> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_error_field_becomes_message() {
        let err = RequestFailed::from_body(401, &json!({"error": "Invalid credentials"}));
        assert_eq!(err.message, "Invalid credentials");
        assert_eq!(err.status, Some(401));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn missing_error_field_falls_back() {
        let err = RequestFailed::from_body(500, &json!({"detail": "boom"}));
        assert_eq!(err.message, GENERIC_FAILURE);

        // empty strings are falsy upstream too
        let err = RequestFailed::from_body(400, &json!({"error": ""}));
        assert_eq!(err.message, GENERIC_FAILURE);
    }
}
