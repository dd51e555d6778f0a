//! App Root Component
//!
//! Routing, the guard in front of the dashboard, and global providers.

use campus::routing::{Admission, Route as AppRoute};
use leptos::*;
use leptos_router::*;

use crate::api::provide_api_client;
use crate::components::{Navbar, Toast};
use crate::pages::{Dashboard, Landing, Login, Register};
use crate::state::{provide_notices, provide_session_state, use_session};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_api_client();
    provide_session_state();
    provide_notices();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-50 text-gray-900 flex flex-col">
                <Navbar />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path=AppRoute::Landing.path() view=Landing />
                        <Route path=AppRoute::Login.path() view=Login />
                        <Route path=AppRoute::Register.path() view=Register />
                        <Route
                            path=AppRoute::Dashboard.path()
                            view=|| view! { <Protected route=AppRoute::Dashboard><Dashboard /></Protected> }
                        />
                        <Route path="/*any" view=|| view! { <Redirect path=AppRoute::Landing.path() /> } />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// Renders its children only while the guard admits `route`. The check is
/// reactive, so signing out elsewhere unmounts the page and redirects.
#[component]
fn Protected(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || match session.admit(route) {
        Admission::Render(_) => children().into_view(),
        Admission::Redirect(target) => view! { <Redirect path=target.path() /> }.into_view(),
    }
}
