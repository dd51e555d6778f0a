//! Session Store and Session Context
//!
//! - [`SessionStore`]: persists the session record under [`SESSION_KEY`]
//! - [`SessionContext`]: shared handle with a reactive update channel

mod context;
mod store;

pub use context::SessionContext;
#[cfg(feature = "native")]
pub use store::FileSessionStore;
pub use store::{
    decode_session, MemorySessionStore, SessionError, SessionResult, SessionStore, SESSION_KEY,
};
