//! HTTP API Client
//!
//! The browser's [`Transport`] for the campus REST API. The typed operations,
//! paths and error decoding are the `campus` crate's, so both front ends
//! speak the same contract and run the same view logic.

use std::sync::Arc;

use async_trait::async_trait;
use campus::api::{paths, ApiClient, ApiRequest, ApiResponse, ClientError, ClientResult, Method, Transport};
use gloo_net::http::Request;
use leptos::*;

/// Local storage key overriding the API base URL
pub const API_URL_KEY: &str = "campus_api_url";

/// Empty means same-origin: requests go to relative paths
pub const DEFAULT_API_BASE: &str = "";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// gloo-net (fetch) transport
pub struct BrowserTransport {
    base_url: String,
}

impl BrowserTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base(base_url),
        }
    }

    fn url(&self, path: &str) -> String {
        paths::join(&self.base_url, path)
    }
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = self.url(&request.path);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };
        let outgoing = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ClientError::Transport(e.to_string()))?;

        let response = outgoing
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        // Failure bodies are read too; they carry the server's detail text
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

/// Provide the API client to the component tree
pub fn provide_api_client() {
    let transport = BrowserTransport::new(&get_api_base());
    provide_context(ApiClient::new(Arc::new(transport)));
}

pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}
