//! Groups list view

use super::{require_text, FailurePolicy, Feedback, Listing};
use crate::api::{ApiClient, ClientResult};
use crate::models::{CreateGroupRequest, Group, Id, Session};

pub const EMPTY_GROUPS: &str = "No groups yet.";

/// All groups, plus the create-group form
#[derive(Clone)]
pub struct GroupsView {
    api: ApiClient,
    groups: Listing<Group>,
    feedback: Option<Feedback>,
}

impl GroupsView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            groups: Listing::new(),
            feedback: None,
        }
    }

    pub fn groups(&self) -> &[Group] {
        self.groups.items()
    }

    pub fn listing(&self) -> &Listing<Group> {
        &self.groups
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.groups.placeholder(EMPTY_GROUPS)
    }

    pub fn find(&self, id: &Id) -> Option<&Group> {
        self.groups.items().iter().find(|g| &g.id == id)
    }

    /// Fetch every group. On failure the previous list stays on screen.
    pub async fn load(&mut self) -> ClientResult<()> {
        match self.api.list_groups().await {
            Ok(groups) => {
                tracing::debug!(count = groups.len(), "Loaded groups");
                self.groups.replace(groups);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load groups");
                self.feedback = Some(Feedback::from_error(
                    FailurePolicy::Notify,
                    &e,
                    "Could not load groups",
                ));
                Err(e)
            }
        }
    }

    /// Create a group and put it at the top of the list.
    ///
    /// An empty name issues no request. The created group comes back in the
    /// response, so the list is not fetched again. Failures raise a blocking
    /// alert.
    pub async fn create(
        &mut self,
        session: &Session,
        name: &str,
        description: &str,
    ) -> ClientResult<Group> {
        let name = require_text("Group name", name)?;
        let request = CreateGroupRequest {
            name,
            description: description.trim().to_string(),
            created_by: session.user_id().clone(),
        };

        match self.api.create_group(&request).await {
            Ok(group) => {
                tracing::info!(group_id = %group.id, name = %group.name, "Created group");
                self.groups.prepend(group.clone());
                Ok(group)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create group");
                self.feedback = Some(Feedback::from_error(
                    FailurePolicy::Alert,
                    &e,
                    "Could not create group",
                ));
                Err(e)
            }
        }
    }

    /// Pending user-visible message, if the last request failed
    pub fn take_feedback(&mut self) -> Option<Feedback> {
        self.feedback.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientError, Method};
    use crate::test_support::{client, session, ScriptedTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_load_and_placeholder() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!([]));
        let mut view = GroupsView::new(client(&transport));

        assert_eq!(view.placeholder(), None);
        view.load().await.unwrap();
        assert_eq!(view.placeholder(), Some(EMPTY_GROUPS));
        assert_eq!(transport.requests()[0].path, "/api/groups");
    }

    #[tokio::test]
    async fn test_empty_name_issues_no_request() {
        let transport = ScriptedTransport::new();
        let mut view = GroupsView::new(client(&transport));

        let err = view.create(&session("u1", "Ada"), "   ", "").await.unwrap_err();
        assert_eq!(err, ClientError::Validation("Group name"));
        assert_eq!(transport.request_count(), 0);
        assert!(view.take_feedback().is_none());
    }

    #[tokio::test]
    async fn test_create_prepends_without_refetch() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!([{"id": "g1", "name": "Robotics"}]));
        transport.respond(
            201,
            json!({"id": "g2", "name": "Chess Club", "description": "", "created_by": "u1"}),
        );
        let mut view = GroupsView::new(client(&transport));
        view.load().await.unwrap();

        let group = view
            .create(&session("u1", "Ada"), "Chess Club", "")
            .await
            .unwrap();
        assert_eq!(group.name, "Chess Club");

        let names: Vec<_> = view.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Chess Club", "Robotics"]);

        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        let posts: Vec<_> = sent.iter().filter(|r| r.method == Method::Post).collect();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].path, "/api/groups");
        let body = posts[0].body.as_ref().unwrap();
        assert_eq!(body["name"], "Chess Club");
        assert_eq!(body["created_by"], "u1");
    }

    #[tokio::test]
    async fn test_create_failure_raises_alert() {
        let transport = ScriptedTransport::new();
        transport.respond(500, json!({}));
        let mut view = GroupsView::new(client(&transport));

        assert!(view.create(&session("u1", "Ada"), "Chess Club", "").await.is_err());
        assert!(view.groups().is_empty());
        assert_eq!(
            view.take_feedback(),
            Some(Feedback::new(FailurePolicy::Alert, "Could not create group"))
        );
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_stale_list() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!([{"id": "g1", "name": "Robotics"}]));
        transport.fail("connection reset");
        let mut view = GroupsView::new(client(&transport));

        view.load().await.unwrap();
        assert!(view.load().await.is_err());
        assert_eq!(view.groups().len(), 1);
        assert_eq!(view.take_feedback().unwrap().policy, FailurePolicy::Notify);
    }
}
