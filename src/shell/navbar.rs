//! Navigation bar

use crate::models::Session;
use crate::routing::{Admission, Route};
use crate::session::{SessionContext, SessionResult};

pub const BRAND: &str = "Campus";

/// One link in the navbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
    /// Rendered as a button rather than a plain link
    pub primary: bool,
}

/// What the navbar shows for a given session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    pub links: Vec<NavLink>,
    /// Avatar letter, present when signed in
    pub avatar: Option<char>,
}

impl Navbar {
    pub fn for_session(session: Option<&Session>) -> Self {
        let mut links = vec![NavLink {
            label: "Dashboard",
            route: Route::Dashboard,
            primary: false,
        }];

        if session.is_none() {
            links.push(NavLink {
                label: "Login",
                route: Route::Login,
                primary: false,
            });
            links.push(NavLink {
                label: "Sign up",
                route: Route::Register,
                primary: true,
            });
        }

        Self {
            links,
            avatar: session.map(|s| s.user.initial()),
        }
    }

    /// Whether the Logout control is shown
    pub fn shows_logout(&self) -> bool {
        self.avatar.is_some()
    }
}

/// Clear the session and go to the login screen
pub fn logout(session: &SessionContext) -> SessionResult<Admission> {
    session.sign_out()?;
    Ok(Admission::Redirect(Route::Login))
}
