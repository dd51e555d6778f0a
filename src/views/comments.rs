//! Comments of one post

use super::{require_text, FailurePolicy, Feedback, Listing};
use crate::api::{ApiClient, ClientResult};
use crate::models::{Comment, CreateCommentRequest, Id, Session};

pub const EMPTY_COMMENTS: &str = "No comments yet.";

#[derive(Clone)]
pub struct CommentsView {
    api: ApiClient,
    post_id: Id,
    comments: Listing<Comment>,
    feedback: Option<Feedback>,
}

impl CommentsView {
    pub fn new(api: ApiClient, post_id: Id) -> Self {
        Self {
            api,
            post_id,
            comments: Listing::new(),
            feedback: None,
        }
    }

    /// Start from comments the post already carried
    pub fn with_comments(api: ApiClient, post_id: Id, comments: Vec<Comment>) -> Self {
        Self {
            comments: Listing::loaded(comments),
            ..Self::new(api, post_id)
        }
    }

    pub fn post_id(&self) -> &Id {
        &self.post_id
    }

    pub fn comments(&self) -> &[Comment] {
        self.comments.items()
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.comments.placeholder(EMPTY_COMMENTS)
    }

    /// Whether the list was fetched or came embedded in the post
    pub fn is_loaded(&self) -> bool {
        self.comments.is_loaded()
    }

    pub async fn load(&mut self) -> ClientResult<()> {
        match self.api.list_comments(&self.post_id).await {
            Ok(comments) => {
                self.comments.replace(comments);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(post_id = %self.post_id, error = %e, "Failed to load comments");
                self.feedback = Some(Feedback::from_error(
                    FailurePolicy::Notify,
                    &e,
                    "Could not load comments",
                ));
                Err(e)
            }
        }
    }

    /// Post a comment, then fetch the comment list again.
    ///
    /// Any success status counts; the acknowledgement body is not read. The
    /// fetched list replaces the local one wholesale, so the new comment
    /// shows up exactly once.
    pub async fn create(&mut self, session: &Session, content: &str) -> ClientResult<()> {
        let content = require_text("Comment", content)?;
        let request = CreateCommentRequest {
            post_id: self.post_id.clone(),
            author_id: session.user_id().clone(),
            content,
        };

        if let Err(e) = self.api.create_comment(&request).await {
            tracing::warn!(post_id = %self.post_id, error = %e, "Failed to post comment");
            self.feedback = Some(Feedback::from_error(
                FailurePolicy::Notify,
                &e,
                "Could not post comment",
            ));
            return Err(e);
        }
        tracing::info!(post_id = %self.post_id, "Posted comment");

        // The comment exists server-side even if the refresh fails
        let _ = self.load().await;
        Ok(())
    }

    pub fn take_feedback(&mut self) -> Option<Feedback> {
        self.feedback.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::test_support::{client, session, ScriptedTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_comment_posts_then_refetches_once() {
        let transport = ScriptedTransport::new();
        transport.respond(
            201,
            json!({"id": "c2", "post_id": "p1", "author_id": "u1", "content": "nice!"}),
        );
        transport.respond(
            200,
            json!([
                {"id": "c1", "post_id": "p1", "author_id": "u2", "content": "first"},
                {"id": "c2", "post_id": "p1", "author_id": "u1", "content": "nice!"}
            ]),
        );
        let existing = vec![Comment {
            id: Id::new("c1"),
            post_id: Id::new("p1"),
            author_id: Id::new("u2"),
            content: "first".to_string(),
        }];
        let mut view = CommentsView::with_comments(client(&transport), Id::new("p1"), existing);

        view.create(&session("u1", "Ada"), "nice!").await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!((sent[0].method, sent[0].path.as_str()), (Method::Post, "/api/posts/p1/comments"));
        assert_eq!((sent[1].method, sent[1].path.as_str()), (Method::Get, "/api/posts/p1/comments"));
        assert_eq!(sent[0].body.as_ref().unwrap()["content"], "nice!");

        let nice = view.comments().iter().filter(|c| c.content == "nice!").count();
        assert_eq!(nice, 1);
        assert_eq!(view.comments().len(), 2);
    }

    #[tokio::test]
    async fn test_short_acknowledgement_still_refetches() {
        let transport = ScriptedTransport::new();
        transport.respond(201, json!({"id": "c2"}));
        transport.respond(
            200,
            json!([{"id": "c2", "post_id": "p1", "author_id": "u1", "content": "nice!"}]),
        );
        let mut view = CommentsView::new(client(&transport), Id::new("p1"));

        view.create(&session("u1", "Ada"), "nice!").await.unwrap();

        assert_eq!(transport.request_count(), 2);
        assert_eq!(view.comments().len(), 1);
        assert_eq!(view.comments()[0].content, "nice!");
        assert!(view.take_feedback().is_none());
    }

    #[tokio::test]
    async fn test_empty_comment_issues_no_request() {
        let transport = ScriptedTransport::new();
        let mut view = CommentsView::new(client(&transport), Id::new("p1"));

        assert!(view.create(&session("u1", "Ada"), "").await.is_err());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_comment_notifies_and_skips_refetch() {
        let transport = ScriptedTransport::new();
        transport.fail("timed out");
        let mut view = CommentsView::new(client(&transport), Id::new("p1"));

        assert!(view.create(&session("u1", "Ada"), "nice!").await.is_err());
        assert_eq!(transport.request_count(), 1);
        assert_eq!(
            view.take_feedback(),
            Some(Feedback::new(FailurePolicy::Notify, "Could not post comment"))
        );
    }

    #[tokio::test]
    async fn test_placeholder_after_empty_load() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!([]));
        let mut view = CommentsView::new(client(&transport), Id::new("p1"));

        view.load().await.unwrap();
        assert_eq!(view.placeholder(), Some(EMPTY_COMMENTS));
    }
}
