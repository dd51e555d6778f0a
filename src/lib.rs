//! # Campus
//!
//! Client for a campus community network. Students register, sign in, join
//! groups, and share posts that others can comment on and like. All data
//! lives behind a remote HTTP API; this crate holds the client-side
//! contract: session persistence, route guarding, the API client and the
//! per-resource views that keep their lists in sync with the server.
//!
//! ## Modules
//!
//! - [`models`]: Records exchanged with the API
//! - [`api`]: Endpoint client over a pluggable [`api::Transport`]
//! - [`session`]: Persisted sign-in and the shared session context
//! - [`routing`]: Routes and the guard in front of protected screens
//! - [`views`]: Groups, posts, comments and likes view models
//! - [`shell`]: Screens composed from the pieces above
//! - [`config`]: TOML and environment configuration (native only)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use campus::api::{ApiClient, HttpTransport};
//! use campus::session::{FileSessionStore, SessionContext};
//! use campus::shell::{Screen, Shell};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new("http://localhost:8000", None)?;
//!     let session = SessionContext::new(Arc::new(FileSessionStore::new("./campus_data")))?;
//!     let mut shell = Shell::new(ApiClient::new(Arc::new(transport)), session);
//!
//!     shell.navigate("/dashboard").await;
//!     if let Screen::Dashboard(dashboard) = shell.screen() {
//!         println!("{} groups", dashboard.groups().groups().len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
#[cfg(feature = "native")]
pub mod config;
pub mod models;
pub mod routing;
pub mod session;
pub mod shell;
pub mod views;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, ClientError, ClientResult};
pub use models::{Comment, Group, Id, Like, Post, Session, User};
pub use routing::{Admission, Route, RouteGuard};
pub use session::{SessionContext, SessionError, SessionStore};
