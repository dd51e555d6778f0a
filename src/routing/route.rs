//! Application routes

use std::fmt;

/// Screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Landing, Route::Login, Route::Register, Route::Dashboard];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Whether the route needs a session to render
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard)
    }

    /// Match a path exactly. Query strings and fragments are ignored, as is a
    /// single trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Resolve a path, sending anything unknown to the landing page
    pub fn resolve(path: &str) -> Route {
        Route::from_path(path).unwrap_or_else(|| {
            tracing::debug!(path, "Unknown path, redirecting to landing");
            Route::Landing
        })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/login?next=/dashboard"), Some(Route::Login));
    }

    #[test]
    fn test_catch_all_goes_to_landing() {
        assert_eq!(Route::resolve("/nope"), Route::Landing);
        assert_eq!(Route::resolve(""), Route::Landing);
        assert_eq!(Route::resolve("/dashboard/settings"), Route::Landing);
    }

    #[test]
    fn test_only_dashboard_is_protected() {
        let protected: Vec<_> = Route::ALL.into_iter().filter(Route::is_protected).collect();
        assert_eq!(protected, vec![Route::Dashboard]);
    }
}
