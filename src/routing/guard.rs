//! Route Guard
//!
//! Decides whether a screen may render. Admission is checked synchronously on
//! every navigation; a mounted protected screen also holds a
//! [`ProtectedMount`] so it is told about a logout right away instead of on
//! the next navigation.

use tokio::sync::watch;

use super::route::Route;
use crate::models::Session;
use crate::session::SessionContext;

/// Outcome of a navigation
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// Render this route
    Render(Route),
    /// Replace the current location with this route
    Redirect(Route),
}

impl Admission {
    /// The route that ends up on screen
    pub fn route(&self) -> Route {
        match self {
            Admission::Render(route) | Admission::Redirect(route) => *route,
        }
    }
}

/// Gate for protected routes
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionContext,
}

impl RouteGuard {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// Admit `route` if it is public or a session is present; otherwise send
    /// the user to the login screen.
    pub fn admit(&self, route: Route) -> Admission {
        if route.is_protected() && !self.session.is_authenticated() {
            tracing::debug!(%route, "No session, redirecting to login");
            Admission::Redirect(Route::Login)
        } else {
            Admission::Render(route)
        }
    }

    /// Resolve a raw path (unknown paths redirect to the landing page) and
    /// apply [`admit`](Self::admit).
    pub fn navigate(&self, path: &str) -> Admission {
        match Route::from_path(path) {
            Some(route) => self.admit(route),
            None => Admission::Redirect(Route::resolve(path)),
        }
    }

    /// Mount a protected route. Returns `None` when the route may not render.
    pub fn mount(&self, route: Route) -> Option<ProtectedMount> {
        match self.admit(route) {
            Admission::Render(route) => Some(ProtectedMount {
                route,
                rx: self.session.subscribe(),
            }),
            Admission::Redirect(_) => None,
        }
    }
}

/// A rendered route that keeps watching the session
pub struct ProtectedMount {
    route: Route,
    rx: watch::Receiver<Option<Session>>,
}

impl ProtectedMount {
    pub fn route(&self) -> Route {
        self.route
    }

    /// Whether the route may still be shown
    pub fn is_admitted(&self) -> bool {
        !self.route.is_protected() || self.rx.borrow().is_some()
    }

    /// Wait until the session goes away, then yield the redirect to show.
    ///
    /// Public routes never get evicted, so for them this only returns once
    /// the session context itself has been dropped.
    pub async fn evicted(&mut self) -> Admission {
        loop {
            if !self.is_admitted() {
                return Admission::Redirect(Route::Login);
            }
            if self.rx.changed().await.is_err() {
                // Context dropped; nothing can sign us out any more
                return Admission::Render(self.route);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionStore};
    use crate::test_support::{session, user};
    use std::sync::Arc;
    use std::time::Duration;

    fn guard_with(store: Arc<MemorySessionStore>) -> (RouteGuard, SessionContext) {
        let ctx = SessionContext::new(store).unwrap();
        (RouteGuard::new(ctx.clone()), ctx)
    }

    #[test]
    fn test_protected_without_session_redirects() {
        let (guard, _ctx) = guard_with(Arc::new(MemorySessionStore::new()));
        assert_eq!(guard.admit(Route::Dashboard), Admission::Redirect(Route::Login));
        assert_eq!(guard.navigate("/dashboard"), Admission::Redirect(Route::Login));
    }

    #[test]
    fn test_protected_with_session_renders() {
        let store = Arc::new(MemorySessionStore::new());
        store.save(&session("u1", "Ada")).unwrap();
        let (guard, _ctx) = guard_with(store);
        assert_eq!(guard.admit(Route::Dashboard), Admission::Render(Route::Dashboard));
    }

    #[test]
    fn test_public_routes_always_render() {
        let (guard, _ctx) = guard_with(Arc::new(MemorySessionStore::new()));
        for route in [Route::Landing, Route::Login, Route::Register] {
            assert_eq!(guard.admit(route), Admission::Render(route));
        }
    }

    #[test]
    fn test_unknown_path_redirects_home() {
        let (guard, _ctx) = guard_with(Arc::new(MemorySessionStore::new()));
        assert_eq!(guard.navigate("/groups/42"), Admission::Redirect(Route::Landing));
    }

    #[test]
    fn test_logout_then_navigation_redirects() {
        let (guard, ctx) = guard_with(Arc::new(MemorySessionStore::new()));
        ctx.sign_in(user("u1", "Ada")).unwrap();
        assert_eq!(guard.navigate("/dashboard"), Admission::Render(Route::Dashboard));

        ctx.sign_out().unwrap();
        assert_eq!(guard.navigate("/dashboard"), Admission::Redirect(Route::Login));
        assert!(guard.mount(Route::Dashboard).is_none());
    }

    #[tokio::test]
    async fn test_mounted_view_observes_logout() {
        let (guard, ctx) = guard_with(Arc::new(MemorySessionStore::new()));
        ctx.sign_in(user("u1", "Ada")).unwrap();

        let mut mount = guard.mount(Route::Dashboard).unwrap();
        assert!(mount.is_admitted());

        let signer = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            signer.sign_out().unwrap();
        });

        let outcome = tokio::time::timeout(Duration::from_secs(1), mount.evicted())
            .await
            .unwrap();
        assert_eq!(outcome, Admission::Redirect(Route::Login));
        assert!(!mount.is_admitted());
    }
}
