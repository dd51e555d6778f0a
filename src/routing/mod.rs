//! Routing
//!
//! Routes `/`, `/login`, `/register` and `/dashboard`, a catch-all redirect to
//! `/`, and the guard in front of the protected dashboard.

mod guard;
mod route;

pub use guard::{Admission, ProtectedMount, RouteGuard};
pub use route::Route;
