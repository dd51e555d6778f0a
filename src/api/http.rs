//! Reqwest transport
//!
//! Carries requests to `{base_url}{path}` over HTTP. Every request gets an
//! `x-request-id` so client and server logs can be matched up.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::error::{ClientError, ClientResult};
use super::paths;
use super::transport::{ApiRequest, ApiResponse, Method, Transport};

/// Header carrying the per-request UUID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP transport backed by reqwest
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the given base URL.
    ///
    /// Outside the browser there is no "same origin", so an empty base URL is
    /// a configuration error. `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Config(
                "an API base URL is required outside the browser".to_string(),
            ));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API base URL must start with http:// or https://, got {base_url}"
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = paths::join(&self.base_url, &request.path);
        let request_id = uuid::Uuid::new_v4().to_string();

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let builder = builder.header(REQUEST_ID_HEADER, &request_id);
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                request_id = %request_id,
                method = %request.method,
                path = %request.path,
                error = %e,
                "Request failed before a response"
            );
            ClientError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        tracing::debug!(
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            status,
            "Request completed"
        );

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn spawn_stub() -> String {
        let app = Router::new()
            .route(
                "/api/groups",
                get(|| async { Json(json!([{"id": "g1", "name": "Chess Club"}])) }).post(
                    |headers: HeaderMap, Json(body): Json<Value>| async move {
                        let has_id = headers.contains_key(REQUEST_ID_HEADER);
                        (
                            StatusCode::CREATED,
                            Json(json!({"id": "g2", "name": body["name"], "traced": has_id})),
                        )
                    },
                ),
            )
            .route(
                "/api/groups/:id/posts",
                get(|Path(id): Path<String>| async move {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"detail": format!("Group {id} not found")})),
                    )
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_empty_base_url_rejected() {
        assert!(matches!(
            HttpTransport::new("", None),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            HttpTransport::new("localhost:8000", None),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let transport = HttpTransport::new("http://localhost:8000/", None).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_get_and_post_against_stub() {
        let base = spawn_stub().await;
        let transport = HttpTransport::new(&base, Some(Duration::from_secs(5))).unwrap();

        let listed = transport.send(ApiRequest::get("/api/groups")).await.unwrap();
        assert_eq!(listed.status, 200);
        assert!(listed.body.contains("Chess Club"));

        let created = transport
            .send(ApiRequest::post("/api/groups", json!({"name": "Robotics"})))
            .await
            .unwrap();
        assert_eq!(created.status, 201);
        let body: Value = serde_json::from_str(&created.body).unwrap();
        assert_eq!(body["name"], "Robotics");
        assert_eq!(body["traced"], true);
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let base = spawn_stub().await;
        let transport = HttpTransport::new(&base, None).unwrap();

        let response = transport
            .send(ApiRequest::get("/api/groups/g9/posts"))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
        assert!(response.body.contains("Group g9 not found"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(&format!("http://{addr}"), None).unwrap();
        let err = transport.send(ApiRequest::get("/api/groups")).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
