//! Page Shell
//!
//! Composes the route guard, session context and resource views into
//! navigable screens. The browser front end renders these screens with
//! Leptos; the command-line front end drives them directly.

pub mod auth;
pub mod dashboard;
pub mod landing;
pub mod navbar;

pub use auth::{AuthError, LoginForm, RegisterForm};
pub use dashboard::{Dashboard, PostThread};
pub use navbar::{NavLink, Navbar};

use crate::api::ApiClient;
use crate::routing::{Admission, ProtectedMount, Route, RouteGuard};
use crate::session::{SessionContext, SessionResult};

/// What is currently on screen
pub enum Screen {
    Landing,
    Login(LoginForm),
    Register(RegisterForm),
    Dashboard(Box<Dashboard>),
}

/// The running application: one screen at a time
pub struct Shell {
    api: ApiClient,
    session: SessionContext,
    guard: RouteGuard,
    location: Route,
    screen: Screen,
    mount: Option<ProtectedMount>,
}

impl Shell {
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self {
            guard: RouteGuard::new(session.clone()),
            api,
            session,
            location: Route::Landing,
            screen: Screen::Landing,
            mount: None,
        }
    }

    pub fn location(&self) -> Route {
        self.location
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn navbar(&self) -> Navbar {
        Navbar::for_session(self.session.current().as_ref())
    }

    /// Navigate to `path`, following guard redirects, and mount the screen.
    ///
    /// Mounting the dashboard fetches the group list.
    pub async fn navigate(&mut self, path: &str) -> Admission {
        let admission = self.guard.navigate(path);
        // A redirect target is always renderable: login, register and landing
        // are public, and the dashboard is only a target right after sign-in.
        let route = match self.guard.admit(admission.route()) {
            Admission::Render(route) => route,
            Admission::Redirect(route) => route,
        };
        self.mount_route(route).await;
        admission
    }

    async fn mount_route(&mut self, route: Route) {
        tracing::debug!(%route, "Mounting screen");
        self.location = route;
        self.mount = None;
        self.screen = match route {
            Route::Landing => Screen::Landing,
            Route::Login => Screen::Login(LoginForm::new()),
            Route::Register => Screen::Register(RegisterForm::new()),
            Route::Dashboard => match (self.guard.mount(route), self.session.current()) {
                (Some(mount), Some(session)) => {
                    self.mount = Some(mount);
                    let mut dashboard = Dashboard::new(self.api.clone(), session);
                    // Load failures are reported through the dashboard's feedback
                    let _ = dashboard.mount().await;
                    Screen::Dashboard(Box::new(dashboard))
                }
                _ => {
                    self.location = Route::Login;
                    Screen::Login(LoginForm::new())
                }
            },
        };
    }

    /// Re-check the mounted protected screen against the session.
    ///
    /// Returns the redirect when the session went away since it mounted.
    pub async fn revalidate(&mut self) -> Option<Admission> {
        let evicted = self.mount.as_ref().is_some_and(|m| !m.is_admitted());
        if !evicted {
            return None;
        }
        self.mount_route(Route::Login).await;
        Some(Admission::Redirect(Route::Login))
    }

    /// Submit whichever auth form is on screen; on success the dashboard is
    /// mounted.
    pub async fn submit_auth(&mut self) -> Result<Admission, AuthError> {
        let outcome = match &mut self.screen {
            Screen::Login(form) => form.submit(&self.api, &self.session).await,
            Screen::Register(form) => form.submit(&self.api, &self.session).await,
            _ => return Ok(Admission::Render(self.location)),
        };
        let admission = outcome?;
        self.mount_route(admission.route()).await;
        Ok(admission)
    }

    /// Log out and show the login screen
    pub async fn logout(&mut self) -> SessionResult<Admission> {
        let admission = navbar::logout(&self.session)?;
        self.mount_route(admission.route()).await;
        Ok(admission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Id;
    use crate::session::{MemorySessionStore, SessionStore};
    use crate::test_support::{client, session, ScriptedTransport};
    use serde_json::json;
    use std::sync::Arc;

    fn shell(transport: &Arc<ScriptedTransport>, store: Arc<MemorySessionStore>) -> Shell {
        Shell::new(client(transport), SessionContext::new(store).unwrap())
    }

    #[tokio::test]
    async fn test_dashboard_without_session_shows_login() {
        let transport = ScriptedTransport::new();
        let mut app = shell(&transport, Arc::new(MemorySessionStore::new()));

        let admission = app.navigate("/dashboard").await;
        assert_eq!(admission, Admission::Redirect(Route::Login));
        assert_eq!(app.location(), Route::Login);
        assert!(matches!(app.screen(), Screen::Login(_)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_dashboard_with_session_loads_groups() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!([{"id": "g1", "name": "Robotics"}]));
        let store = Arc::new(MemorySessionStore::new());
        store.save(&session("u1", "Ada")).unwrap();
        let mut app = shell(&transport, store);

        assert_eq!(app.navigate("/dashboard").await, Admission::Render(Route::Dashboard));
        match app.screen() {
            Screen::Dashboard(dashboard) => assert_eq!(dashboard.groups().groups().len(), 1),
            _ => panic!("expected dashboard"),
        }
    }

    #[tokio::test]
    async fn test_unknown_path_lands_home() {
        let transport = ScriptedTransport::new();
        let mut app = shell(&transport, Arc::new(MemorySessionStore::new()));

        assert_eq!(app.navigate("/whatever").await, Admission::Redirect(Route::Landing));
        assert!(matches!(app.screen(), Screen::Landing));
    }

    #[tokio::test]
    async fn test_login_flow_then_logout() {
        let transport = ScriptedTransport::new();
        let store = Arc::new(MemorySessionStore::new());
        let mut app = shell(&transport, store.clone());

        app.navigate("/login").await;
        if let Screen::Login(form) = app.screen_mut() {
            form.email = "ada@school.edu".to_string();
            form.password = "hunter22".to_string();
        }
        transport.respond(200, json!({"id": "u1", "name": "Ada", "email": "ada@school.edu"}));
        transport.respond(200, json!([]));

        let admission = app.submit_auth().await.unwrap();
        assert_eq!(admission, Admission::Redirect(Route::Dashboard));
        assert_eq!(app.location(), Route::Dashboard);
        assert_eq!(app.navbar().avatar, Some('A'));

        app.logout().await.unwrap();
        assert_eq!(app.location(), Route::Login);
        assert!(store.load().unwrap().is_none());
        assert_eq!(app.navigate("/dashboard").await, Admission::Redirect(Route::Login));
    }

    #[tokio::test]
    async fn test_logout_elsewhere_evicts_mounted_dashboard() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!([]));
        let store = Arc::new(MemorySessionStore::new());
        store.save(&session("u1", "Ada")).unwrap();
        let mut app = shell(&transport, store);
        app.navigate("/dashboard").await;
        assert!(app.revalidate().await.is_none());

        // Another consumer of the same context signs out
        let other = app.session().clone();
        other.sign_out().unwrap();

        assert_eq!(app.revalidate().await, Some(Admission::Redirect(Route::Login)));
        assert!(matches!(app.screen(), Screen::Login(_)));
    }

    #[tokio::test]
    async fn test_dashboard_actions_through_shell() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!([{"id": "g1", "name": "Robotics"}]));
        let store = Arc::new(MemorySessionStore::new());
        store.save(&session("u1", "Ada")).unwrap();
        let mut app = shell(&transport, store);
        app.navigate("/dashboard").await;

        transport.respond(200, json!([]));
        if let Screen::Dashboard(dashboard) = app.screen_mut() {
            dashboard.open_group(&Id::new("g1")).await.unwrap();
            assert_eq!(dashboard.posts().placeholder(), Some("No posts yet."));
        } else {
            panic!("expected dashboard");
        }
    }
}
