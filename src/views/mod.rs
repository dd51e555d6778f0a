//! Resource Views
//!
//! Each view owns the fetch/render/mutate cycle of one API collection:
//!
//! 1. fetch the collection on mount or selection change
//! 2. render it, with an explicit placeholder when it is empty
//! 3. on submission, check the field is non-empty, send the create request,
//!    merge the result and report failures according to the view's
//!    [`FailurePolicy`]
//!
//! The pieces in this module are free of I/O and are shared with the browser
//! front end.

mod comments;
mod groups;
mod likes;
mod posts;

pub use comments::{CommentsView, EMPTY_COMMENTS};
pub use groups::{GroupsView, EMPTY_GROUPS};
pub use likes::{like_label, LikesView, EMPTY_LIKES};
pub use posts::{PostsView, EMPTY_POSTS};

use crate::api::{ClientError, ClientResult};

/// How a view reports a failed request to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Message shown inside the form (registration, login)
    Inline,
    /// Blocking alert the user must dismiss (group creation)
    Alert,
    /// Non-blocking notification (posts, comments, likes, collection loads)
    Notify,
}

/// A user-visible message produced by a failed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub policy: FailurePolicy,
    pub message: String,
}

impl Feedback {
    pub fn new(policy: FailurePolicy, message: impl Into<String>) -> Self {
        Self {
            policy,
            message: message.into(),
        }
    }

    /// Build the feedback for `err`, preferring the server's own wording
    pub fn from_error(policy: FailurePolicy, err: &ClientError, generic: &str) -> Self {
        Self::new(policy, err.user_message(generic))
    }
}

/// Trim `value` and reject it when nothing is left.
///
/// This is the only client-side check before a create request.
pub fn require_text(field: &'static str, value: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ClientError::Validation(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// A fetched collection plus whether it has been fetched at all
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    items: Vec<T>,
    loaded: bool,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
        }
    }
}

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listing that already holds `items`, e.g. comments embedded in a post
    pub fn loaded(items: Vec<T>) -> Self {
        Self { items, loaded: true }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the whole collection with a fresh fetch
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
    }

    /// Put a newly created item at the top
    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
        self.loaded = true;
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.loaded = false;
    }

    /// Placeholder text to show instead of blank space, once the collection
    /// has been fetched and turned out empty
    pub fn placeholder<'a>(&self, text: &'a str) -> Option<&'a str> {
        (self.loaded && self.items.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("Comment", "  nice!  ").unwrap(), "nice!");
        assert_eq!(
            require_text("Comment", " \n\t").unwrap_err(),
            ClientError::Validation("Comment")
        );
    }

    #[test]
    fn test_placeholder_only_after_load() {
        let mut listing: Listing<u32> = Listing::new();
        assert_eq!(listing.placeholder("No posts yet."), None);

        listing.replace(Vec::new());
        assert_eq!(listing.placeholder("No posts yet."), Some("No posts yet."));

        listing.prepend(1);
        assert_eq!(listing.placeholder("No posts yet."), None);
    }

    #[test]
    fn test_prepend_and_replace() {
        let mut listing = Listing::loaded(vec![2, 3]);
        listing.prepend(1);
        assert_eq!(listing.items(), &[1, 2, 3]);

        listing.replace(vec![9]);
        assert_eq!(listing.items(), &[9]);

        listing.reset();
        assert!(!listing.is_loaded());
        assert!(listing.is_empty());
    }

    #[test]
    fn test_feedback_uses_server_detail() {
        let err = ClientError::Status {
            status: 409,
            detail: Some("Group already exists".to_string()),
        };
        let feedback = Feedback::from_error(FailurePolicy::Alert, &err, "Could not create group");
        assert_eq!(feedback.message, "Group already exists");
        assert_eq!(feedback.policy, FailurePolicy::Alert);
    }
}
