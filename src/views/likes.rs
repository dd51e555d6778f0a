//! Like count of one post

use super::{FailurePolicy, Feedback};
use crate::api::{ApiClient, ClientResult};
use crate::models::{CreateLikeRequest, Id, Session};

pub const EMPTY_LIKES: &str = "No likes yet.";

/// Like button text for a fetched count, or a bare "Like" before the fetch
pub fn like_label(count: Option<usize>) -> String {
    match count {
        Some(1) => "1 like".to_string(),
        Some(n) => format!("{} likes", n),
        None => "Like".to_string(),
    }
}

#[derive(Clone)]
pub struct LikesView {
    api: ApiClient,
    post_id: Id,
    count: Option<usize>,
    feedback: Option<Feedback>,
}

impl LikesView {
    pub fn new(api: ApiClient, post_id: Id) -> Self {
        Self {
            api,
            post_id,
            count: None,
            feedback: None,
        }
    }

    /// Number of likes, once fetched
    pub fn count(&self) -> Option<usize> {
        self.count
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        (self.count == Some(0)).then_some(EMPTY_LIKES)
    }

    pub fn label(&self) -> String {
        like_label(self.count)
    }

    pub async fn load(&mut self) -> ClientResult<usize> {
        match self.api.list_likes(&self.post_id).await {
            Ok(likes) => {
                self.count = Some(likes.len());
                Ok(likes.len())
            }
            Err(e) => {
                tracing::warn!(post_id = %self.post_id, error = %e, "Failed to load likes");
                self.feedback = Some(Feedback::from_error(
                    FailurePolicy::Notify,
                    &e,
                    "Could not load likes",
                ));
                Err(e)
            }
        }
    }

    /// Like the post, then fetch the count again.
    ///
    /// The acknowledgement carries no like record to merge. Repeat likes are
    /// not prevented here. Only a rejected like is an error: when the recount
    /// fails the previous count is returned and the failure is left in the
    /// feedback.
    pub async fn like(&mut self, session: &Session) -> ClientResult<Option<usize>> {
        let request = CreateLikeRequest {
            post_id: self.post_id.clone(),
            user_id: session.user_id().clone(),
        };

        if let Err(e) = self.api.like_post(&request).await {
            tracing::warn!(post_id = %self.post_id, error = %e, "Failed to like post");
            self.feedback = Some(Feedback::from_error(
                FailurePolicy::Notify,
                &e,
                "Could not like post",
            ));
            return Err(e);
        }
        tracing::info!(post_id = %self.post_id, "Liked post");

        let _ = self.load().await;
        Ok(self.count)
    }

    pub fn take_feedback(&mut self) -> Option<Feedback> {
        self.feedback.take()
    }
}
