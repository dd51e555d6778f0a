//! Session context
//!
//! The single owner of "who is logged in". Components receive a clone of the
//! context instead of reading storage themselves, and every change goes out
//! on one watch channel so all mounted consumers see a logout at once.

use std::sync::Arc;
use tokio::sync::watch;

use super::store::{SessionResult, SessionStore};
use crate::models::{Session, User};

/// Shared handle to the current session. Cheap to clone.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionContext {
    /// Build a context, seeding it from whatever the store holds
    pub fn new(store: Arc<dyn SessionStore>) -> SessionResult<Self> {
        let initial = store.load()?;
        let (tx, _rx) = watch::channel(initial);
        Ok(Self {
            store,
            tx: Arc::new(tx),
        })
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Persist a fresh session for `user` and publish it
    pub fn sign_in(&self, user: User) -> SessionResult<Session> {
        let session = Session::new(user);
        self.store.save(&session)?;
        tracing::info!(user_id = %session.user.id, "Signed in");
        self.tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Clear the stored session and publish the logout
    pub fn sign_out(&self) -> SessionResult<()> {
        self.store.clear()?;
        if let Some(previous) = self.tx.send_replace(None) {
            tracing::info!(user_id = %previous.user.id, "Signed out");
        }
        Ok(())
    }

    /// Receiver that observes every sign-in and sign-out from now on
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}
