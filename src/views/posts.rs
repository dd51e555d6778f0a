//! Posts of the selected group, plus the composer

use super::{require_text, FailurePolicy, Feedback, Listing};
use crate::api::{ApiClient, ClientError, ClientResult};
use crate::models::{CreatePostRequest, Group, Post, Session};

pub const EMPTY_POSTS: &str = "No posts yet.";

#[derive(Clone)]
pub struct PostsView {
    api: ApiClient,
    selected: Option<Group>,
    posts: Listing<Post>,
    feedback: Option<Feedback>,
}

impl PostsView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            selected: None,
            posts: Listing::new(),
            feedback: None,
        }
    }

    pub fn selected(&self) -> Option<&Group> {
        self.selected.as_ref()
    }

    pub fn posts(&self) -> &[Post] {
        self.posts.items()
    }

    pub fn listing(&self) -> &Listing<Post> {
        &self.posts
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.selected.as_ref()?;
        self.posts.placeholder(EMPTY_POSTS)
    }

    /// Select `group` and fetch its posts.
    ///
    /// Always fetches, even when the same group is selected again; nothing is
    /// cached across selections.
    pub async fn select(&mut self, group: Group) -> ClientResult<()> {
        tracing::debug!(group_id = %group.id, "Selecting group");
        self.posts.reset();
        let group_id = group.id.clone();
        self.selected = Some(group);

        match self.api.list_posts(&group_id).await {
            Ok(posts) => {
                // Selection may not change while we await (&mut self)
                self.posts.replace(posts);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(group_id = %group_id, error = %e, "Failed to load posts");
                self.feedback = Some(Feedback::from_error(
                    FailurePolicy::Notify,
                    &e,
                    "Could not load posts",
                ));
                Err(e)
            }
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.posts.reset();
    }

    /// Publish `content` to the selected group; the created post goes to the
    /// top of the list.
    pub async fn create(&mut self, session: &Session, content: &str) -> ClientResult<Post> {
        let group_id = match &self.selected {
            Some(group) => group.id.clone(),
            None => return Err(ClientError::Validation("Group")),
        };
        let content = require_text("Post", content)?;

        let request = CreatePostRequest {
            group_id,
            author_id: session.user_id().clone(),
            content,
        };

        match self.api.create_post(&request).await {
            Ok(post) => {
                tracing::info!(post_id = %post.id, group_id = %post.group_id, "Created post");
                self.posts.prepend(post.clone());
                Ok(post)
            }
            Err(e) => {
                tracing::warn!(group_id = %request.group_id, error = %e, "Failed to create post");
                self.feedback = Some(Feedback::from_error(
                    FailurePolicy::Notify,
                    &e,
                    "Could not publish post",
                ));
                Err(e)
            }
        }
    }

    pub fn take_feedback(&mut self) -> Option<Feedback> {
        self.feedback.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::models::Id;
    use crate::test_support::{client, session, ScriptedTransport};
    use serde_json::json;

    fn group(id: &str, name: &str) -> Group {
        Group {
            id: Id::new(id),
            name: name.to_string(),
            description: None,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_select_issues_one_get() {
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            json!([{"id": "p1", "group_id": "g1", "author_id": "u1", "content": "hello"}]),
        );
        let mut view = PostsView::new(client(&transport));

        view.select(group("g1", "Robotics")).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].path, "/api/groups/g1/posts");
        assert_eq!(view.posts().len(), 1);
    }

    #[tokio::test]
    async fn test_switching_groups_refetches() {
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            json!([{"id": "p1", "group_id": "g1", "author_id": "u1", "content": "hello"}]),
        );
        transport.respond(200, json!([]));
        transport.respond(
            200,
            json!([{"id": "p1", "group_id": "g1", "author_id": "u1", "content": "hello"}]),
        );
        let mut view = PostsView::new(client(&transport));

        view.select(group("g1", "Robotics")).await.unwrap();
        view.select(group("g2", "Chess")).await.unwrap();
        assert!(view.posts().is_empty());
        assert_eq!(view.placeholder(), Some(EMPTY_POSTS));

        view.select(group("g1", "Robotics")).await.unwrap();
        let paths: Vec<_> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "/api/groups/g1/posts",
                "/api/groups/g2/posts",
                "/api/groups/g1/posts"
            ]
        );
    }

    #[tokio::test]
    async fn test_create_requires_selection_and_content() {
        let transport = ScriptedTransport::new();
        let mut view = PostsView::new(client(&transport));
        let me = session("u1", "Ada");

        assert!(view.create(&me, "hello").await.unwrap_err().is_validation());

        transport.respond(200, json!([]));
        view.select(group("g1", "Robotics")).await.unwrap();
        assert!(view.create(&me, "  ").await.unwrap_err().is_validation());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_create_merges_returned_post() {
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            json!([{"id": "p1", "group_id": "g1", "author_id": "u2", "content": "older"}]),
        );
        transport.respond(
            201,
            json!({"id": "p2", "group_id": "g1", "author_id": "u1", "content": "newer"}),
        );
        let mut view = PostsView::new(client(&transport));
        view.select(group("g1", "Robotics")).await.unwrap();

        view.create(&session("u1", "Ada"), " newer ").await.unwrap();

        let contents: Vec<_> = view.posts().iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, vec!["newer", "older"]);

        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        let body = sent[1].body.as_ref().unwrap();
        assert_eq!(body["group_id"], "g1");
        assert_eq!(body["author_id"], "u1");
        assert_eq!(body["content"], "newer");
    }

    #[tokio::test]
    async fn test_create_failure_notifies() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!([]));
        transport.respond(503, json!({"detail": "Posting is paused"}));
        let mut view = PostsView::new(client(&transport));
        view.select(group("g1", "Robotics")).await.unwrap();

        assert!(view.create(&session("u1", "Ada"), "hello").await.is_err());
        assert_eq!(
            view.take_feedback(),
            Some(Feedback::new(FailurePolicy::Notify, "Posting is paused"))
        );
        assert!(view.posts().is_empty());
    }
}
