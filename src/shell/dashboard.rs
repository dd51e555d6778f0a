//! Dashboard
//!
//! Authenticated three-pane screen: groups on the left, the selected group's
//! composer and posts in the middle, static shortcuts on the right.

use std::collections::HashMap;

use crate::api::{ApiClient, ClientError, ClientResult};
use crate::models::{Group, Id, Post, Session};
use crate::views::{CommentsView, Feedback, GroupsView, LikesView, PostsView};

pub const SHORTCUTS: [&str; 3] = ["My profile", "Campus events", "Settings"];
pub const PICK_A_GROUP: &str = "Pick a group from the left to view and create posts.";

/// Welcome line shown while no group is selected
pub fn greeting(name: &str) -> String {
    let name = name.trim();
    let name = if name.is_empty() { "Student" } else { name };
    format!("Welcome, {} 👋", name)
}

/// Comments and likes attached to one rendered post
#[derive(Clone)]
pub struct PostThread {
    pub comments: CommentsView,
    pub likes: LikesView,
}

impl PostThread {
    pub fn for_post(api: &ApiClient, post: &Post) -> Self {
        let comments = match &post.comments {
            Some(embedded) => {
                CommentsView::with_comments(api.clone(), post.id.clone(), embedded.clone())
            }
            None => CommentsView::new(api.clone(), post.id.clone()),
        };
        Self {
            comments,
            likes: LikesView::new(api.clone(), post.id.clone()),
        }
    }

    /// Initial fetches once the post is on screen: the like count always,
    /// comments only when the post did not carry them. Failures stay in the
    /// views' feedback.
    pub async fn mount(&mut self) {
        let _ = self.likes.load().await;
        if !self.comments.is_loaded() {
            let _ = self.comments.load().await;
        }
    }

    pub fn drain_feedback(&mut self) -> Vec<Feedback> {
        self.comments
            .take_feedback()
            .into_iter()
            .chain(self.likes.take_feedback())
            .collect()
    }
}

pub struct Dashboard {
    api: ApiClient,
    session: Session,
    groups: GroupsView,
    posts: PostsView,
    threads: HashMap<Id, PostThread>,
}

impl Dashboard {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            groups: GroupsView::new(api.clone()),
            posts: PostsView::new(api.clone()),
            threads: HashMap::new(),
            api,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn greeting(&self) -> String {
        greeting(&self.session.user.name)
    }

    pub fn groups(&self) -> &GroupsView {
        &self.groups
    }

    pub fn posts(&self) -> &PostsView {
        &self.posts
    }

    pub fn selected_group(&self) -> Option<&Group> {
        self.posts.selected()
    }

    pub fn thread(&self, post_id: &Id) -> Option<&PostThread> {
        self.threads.get(post_id)
    }

    /// Initial fetch when the dashboard mounts
    pub async fn mount(&mut self) -> ClientResult<()> {
        self.groups.load().await
    }

    /// Select a group from the list and fetch its posts
    pub async fn open_group(&mut self, group_id: &Id) -> ClientResult<()> {
        let group = self
            .groups
            .find(group_id)
            .cloned()
            .ok_or(ClientError::Validation("Group"))?;

        self.threads.clear();
        self.posts.select(group).await?;
        for post in self.posts.posts() {
            let mut thread = PostThread::for_post(&self.api, post);
            thread.mount().await;
            self.threads.insert(post.id.clone(), thread);
        }
        Ok(())
    }

    pub async fn create_group(&mut self, name: &str, description: &str) -> ClientResult<Group> {
        self.groups.create(&self.session, name, description).await
    }

    pub async fn create_post(&mut self, content: &str) -> ClientResult<Post> {
        let post = self.posts.create(&self.session, content).await?;
        let mut thread = PostThread::for_post(&self.api, &post);
        thread.mount().await;
        self.threads.insert(post.id.clone(), thread);
        Ok(post)
    }

    pub async fn like(&mut self, post_id: &Id) -> ClientResult<Option<usize>> {
        let thread = self
            .threads
            .get_mut(post_id)
            .ok_or(ClientError::Validation("Post"))?;
        thread.likes.like(&self.session).await
    }

    pub async fn comment(&mut self, post_id: &Id, content: &str) -> ClientResult<()> {
        let thread = self
            .threads
            .get_mut(post_id)
            .ok_or(ClientError::Validation("Post"))?;
        thread.comments.create(&self.session, content).await
    }

    /// Collect pending messages from every view
    pub fn drain_feedback(&mut self) -> Vec<Feedback> {
        let mut out: Vec<Feedback> = Vec::new();
        out.extend(self.groups.take_feedback());
        out.extend(self.posts.take_feedback());
        for thread in self.threads.values_mut() {
            out.extend(thread.drain_feedback());
        }
        out
    }
}
