//! Transport seam
//!
//! The HTTP client shim talks to the remote API through [`Transport`], so the
//! same typed operations run over reqwest natively and over a scripted
//! in-memory transport in tests.

use async_trait::async_trait;
use std::fmt;

use super::error::ClientResult;

/// HTTP methods used by the campus API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// An outbound request, relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// JSON body, present for mutations
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Raw response as seen by the shim
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can carry an [`ApiRequest`] to the remote API.
///
/// Implementations return `Err` only when no response was obtained; any
/// HTTP status, including failures, comes back as an [`ApiResponse`].
#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

/// Browser futures are single-threaded, so the wasm seam drops `Send`.
#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = ApiResponse {
            status: 201,
            body: String::new(),
        };
        let redirect = ApiResponse {
            status: 302,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert!(ApiRequest::get("/api/groups").body.is_none());
    }
}
