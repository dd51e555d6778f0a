//! Browser session
//!
//! The session record lives in `localStorage` under the shared key. A
//! [`SessionContext`] owns it and a signal mirrors it, so every component that
//! reads the signal re-renders on sign-in and sign-out.

use std::sync::Arc;

use campus::models::{Session, User};
use campus::routing::{Admission, Route, RouteGuard};
use campus::session::{
    decode_session, SessionContext, SessionError, SessionResult, SessionStore, SESSION_KEY,
};
use leptos::*;

/// `localStorage`-backed session store.
///
/// Holds no handle itself; the storage object is looked up on every call.
pub struct BrowserSessionStore;

fn local_storage() -> SessionResult<web_sys::Storage> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or_else(|| SessionError::Unavailable("localStorage".to_string()))
}

impl SessionStore for BrowserSessionStore {
    fn save(&self, session: &Session) -> SessionResult<()> {
        let raw = serde_json::to_string(session)?;
        local_storage()?
            .set_item(SESSION_KEY, &raw)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }

    fn load(&self) -> SessionResult<Option<Session>> {
        let raw = local_storage()?
            .get_item(SESSION_KEY)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))?;
        Ok(raw.as_deref().and_then(decode_session))
    }

    fn clear(&self) -> SessionResult<()> {
        local_storage()?
            .remove_item(SESSION_KEY)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }
}

/// Session handle provided to the component tree
#[derive(Clone)]
pub struct SessionState {
    context: SessionContext,
    pub current: RwSignal<Option<Session>>,
}

impl SessionState {
    fn new(context: SessionContext) -> Self {
        Self {
            current: create_rw_signal(context.current()),
            context,
        }
    }

    pub fn sign_in(&self, user: User) -> SessionResult<Session> {
        let session = self.context.sign_in(user)?;
        self.current.set(Some(session.clone()));
        Ok(session)
    }

    pub fn sign_out(&self) -> SessionResult<()> {
        self.context.sign_out()?;
        self.current.set(None);
        Ok(())
    }

    /// Guard decision for `route`, tracked so it re-runs on session changes
    pub fn admit(&self, route: Route) -> Admission {
        self.current.with(|_| ());
        RouteGuard::new(self.context.clone()).admit(route)
    }
}

/// Provide the session state to the component tree
pub fn provide_session_state() {
    let context = match SessionContext::new(Arc::new(BrowserSessionStore)) {
        Ok(context) => context,
        Err(e) => {
            web_sys::console::error_1(&format!("Session storage unavailable: {}", e).into());
            // Fall back to a session that lives only as long as the page
            match SessionContext::new(Arc::new(campus::session::MemorySessionStore::new())) {
                Ok(context) => context,
                Err(_) => return,
            }
        }
    };
    provide_context(SessionState::new(context));
}

pub fn use_session() -> SessionState {
    expect_context::<SessionState>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus::models::Id;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn ada() -> Session {
        Session::new(User {
            id: Id::new("u1"),
            name: "Ada".to_string(),
            email: "ada@school.edu".to_string(),
        })
    }

    #[wasm_bindgen_test]
    fn test_session_survives_in_local_storage() {
        let store = BrowserSessionStore;
        store.save(&ada()).unwrap();

        let raw = local_storage().unwrap().get_item(SESSION_KEY).unwrap().unwrap();
        assert!(raw.contains("\"email\":\"ada@school.edu\""));
        assert_eq!(store.load().unwrap().unwrap().user.name, "Ada");

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_corrupt_record_loads_as_signed_out() {
        local_storage().unwrap().set_item(SESSION_KEY, "{not json").unwrap();

        assert_eq!(BrowserSessionStore.load().unwrap(), None);
        BrowserSessionStore.clear().unwrap();
    }
}
