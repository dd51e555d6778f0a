//! Campus data model
//!
//! Records exchanged with the remote campus API. Apart from the identifier,
//! nothing is validated here: the remote API owns ordering, uniqueness and
//! consistency.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Canonical entity identifier.
///
/// Every entity carries exactly one identifier field, `id`. The remote API
/// has been seen emitting both string and integer identifiers, so both are
/// accepted and normalised to a string. Records without an `id` fail to
/// decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = Id;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer identifier")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Id, E> {
                if v.is_empty() {
                    return Err(E::invalid_value(de::Unexpected::Str(v), &self));
                }
                Ok(Id(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

// ============================================
// Entities
// ============================================

/// A registered campus member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
}

impl User {
    /// Single uppercase letter shown in the navbar avatar
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }
}

/// Client-held record asserting that a user is logged in.
///
/// Serialized as the user record itself with an optional `saved_at` next to
/// it, so a bare user record also loads as a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(flatten)]
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self {
            user,
            saved_at: Some(Utc::now()),
        }
    }

    pub fn user_id(&self) -> &Id {
        &self.user.id
    }
}

/// A campus group (class, club, community)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<Id>,
}

/// A post inside a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub group_id: Id,
    pub author_id: Id,
    pub content: String,
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
}

/// A like on a post. Only the number of likes is shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub post_id: Id,
    pub user_id: Id,
}

/// A comment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Id,
    pub post_id: Id,
    pub author_id: Id,
    pub content: String,
}

// ============================================
// Request bodies
// ============================================

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: String,
    pub created_by: Id,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest {
    pub group_id: Id,
    pub author_id: Id,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateLikeRequest {
    pub post_id: Id,
    pub user_id: Id,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub post_id: Id,
    pub author_id: Id,
    pub content: String,
}
