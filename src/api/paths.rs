//! Endpoint paths of the remote campus API.
//!
//! Identifiers are percent-encoded before they are placed in a path.

use crate::models::Id;

pub const REGISTER: &str = "/api/auth/register";
pub const LOGIN: &str = "/api/auth/login";
pub const GROUPS: &str = "/api/groups";

fn segment(id: &Id) -> String {
    urlencoding::encode(id.as_str()).into_owned()
}

pub fn group_posts(group_id: &Id) -> String {
    format!("{}/{}/posts", GROUPS, segment(group_id))
}

pub fn post_likes(post_id: &Id) -> String {
    format!("/api/posts/{}/likes", segment(post_id))
}

pub fn post_comments(post_id: &Id) -> String {
    format!("/api/posts/{}/comments", segment(post_id))
}

/// Join a base URL and an API path. An empty base keeps the path relative
/// (same origin).
pub fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
