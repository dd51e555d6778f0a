//! Campus API client
//!
//! Typed operations over a [`Transport`]. No retry, no cancellation: each call
//! is one request and one response.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use super::error::{error_detail, ClientError, ClientResult};
use super::paths;
use super::transport::{ApiRequest, Transport};
use crate::models::{
    Comment, CreateCommentRequest, CreateGroupRequest, CreateLikeRequest, CreatePostRequest,
    Group, Id, Like, LoginRequest, Post, RegisterRequest, User,
};

/// Client for the remote campus API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send one request and decode a success body into `R`.
    ///
    /// A non-success status becomes [`ClientError::Status`] carrying the
    /// server's `detail` text when the body has one.
    pub async fn request<R: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<R> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            tracing::debug!(%method, %path, status = response.status, "Request rejected");
            return Err(ClientError::Status {
                status: response.status,
                detail: error_detail(&response.body),
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            tracing::warn!(%method, %path, error = %e, "Undecodable response body");
            ClientError::Decode(e.to_string())
        })
    }

    /// Send a request whose success body is ignored
    async fn request_ack(&self, request: ApiRequest) -> ClientResult<()> {
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(ClientError::Status {
                status: response.status,
                detail: error_detail(&response.body),
            })
        }
    }

    fn post_json<B: Serialize>(path: impl Into<String>, body: &B) -> ClientResult<ApiRequest> {
        Ok(ApiRequest::post(path, serde_json::to_value(body)?))
    }

    // ============ Auth ============

    pub async fn register(&self, body: &RegisterRequest) -> ClientResult<User> {
        self.request(Self::post_json(paths::REGISTER, body)?).await
    }

    pub async fn login(&self, body: &LoginRequest) -> ClientResult<User> {
        self.request(Self::post_json(paths::LOGIN, body)?).await
    }

    // ============ Groups ============

    pub async fn list_groups(&self) -> ClientResult<Vec<Group>> {
        self.request(ApiRequest::get(paths::GROUPS)).await
    }

    pub async fn create_group(&self, body: &CreateGroupRequest) -> ClientResult<Group> {
        self.request(Self::post_json(paths::GROUPS, body)?).await
    }

    // ============ Posts ============

    pub async fn list_posts(&self, group_id: &Id) -> ClientResult<Vec<Post>> {
        self.request(ApiRequest::get(paths::group_posts(group_id))).await
    }

    pub async fn create_post(&self, body: &CreatePostRequest) -> ClientResult<Post> {
        self.request(Self::post_json(paths::group_posts(&body.group_id), body)?)
            .await
    }

    // ============ Likes ============

    pub async fn list_likes(&self, post_id: &Id) -> ClientResult<Vec<Like>> {
        self.request(ApiRequest::get(paths::post_likes(post_id))).await
    }

    /// Like a post. The acknowledgement body is not interpreted.
    pub async fn like_post(&self, body: &CreateLikeRequest) -> ClientResult<()> {
        self.request_ack(Self::post_json(paths::post_likes(&body.post_id), body)?)
            .await
    }

    // ============ Comments ============

    pub async fn list_comments(&self, post_id: &Id) -> ClientResult<Vec<Comment>> {
        self.request(ApiRequest::get(paths::post_comments(post_id))).await
    }

    /// Add a comment. Any 2xx counts; callers fetch the list again to see it.
    pub async fn create_comment(&self, body: &CreateCommentRequest) -> ClientResult<()> {
        self.request_ack(Self::post_json(paths::post_comments(&body.post_id), body)?)
            .await
    }
}
