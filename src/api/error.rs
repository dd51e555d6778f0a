//! Client error types
//!
//! Failures a caller of the campus API can observe, from an empty form field
//! through to a rejected request.

use thiserror::Error;

/// Errors raised by the HTTP client shim and the resource views
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// A required field was empty; no request was issued
    #[error("{0} is required")]
    Validation(&'static str),

    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Transport(String),

    /// The remote API answered with a non-success status
    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    /// A success response could not be decoded into the expected record
    #[error("Parse error: {0}")]
    Decode(String),

    /// The client is misconfigured (e.g. no usable base URL)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Message to show the user, preferring the server's own wording.
    ///
    /// The server-provided `detail` is returned verbatim when present; every
    /// other failure falls back to `generic`.
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            ClientError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ClientError::Validation(_) => self.to_string(),
            _ => generic.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Extract the server's error text from a failure body.
///
/// Only a string `detail` field counts; structured details (such as a list
/// of validation problems) and unparseable bodies yield `None`.
pub fn error_detail(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
        _ => None,
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
