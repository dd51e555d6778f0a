//! State Management
//!
//! The session handle and failure notices shared by every page.

pub mod notices;
pub mod session;

pub use notices::{provide_notices, use_notices, Notices};
pub use session::{provide_session_state, use_session, BrowserSessionStore, SessionState};
