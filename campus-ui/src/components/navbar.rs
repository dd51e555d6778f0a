//! Navigation Component
//!
//! Header bar: brand, links for the current session, avatar and logout.

use campus::routing::Route;
use campus::shell::navbar::{Navbar as NavbarModel, BRAND};
use leptos::*;
use leptos_router::*;

use crate::state::{use_notices, use_session};

/// Navigation header component
#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let notices = use_notices();
    let navigate = use_navigate();

    let model = move || NavbarModel::for_session(session.current.get().as_ref());

    let logout_session = session.clone();
    let on_logout = move |_| match logout_session.sign_out() {
        Ok(()) => navigate(Route::Login.path(), Default::default()),
        Err(e) => notices.notify(&format!("Could not sign out: {}", e)),
    };

    view! {
        <nav class="bg-white border-b border-gray-200">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="text-xl font-bold text-indigo-600">{BRAND}</A>

                    <div class="flex items-center space-x-2">
                        {move || {
                            model()
                                .links
                                .into_iter()
                                .map(|link| {
                                    let class = if link.primary {
                                        "px-4 py-2 rounded-lg bg-indigo-600 text-white hover:bg-indigo-700"
                                    } else {
                                        "px-4 py-2 rounded-lg text-gray-600 hover:bg-gray-100"
                                    };
                                    view! { <A href=link.route.path() class=class>{link.label}</A> }
                                })
                                .collect_view()
                        }}

                        {move || {
                            model().avatar.map(|initial| {
                                let on_logout = on_logout.clone();
                                view! {
                                    <span class="w-9 h-9 rounded-full bg-indigo-100 text-indigo-700 flex items-center justify-center font-semibold">
                                        {initial.to_string()}
                                    </span>
                                    <button
                                        class="px-3 py-2 text-sm text-gray-600 hover:text-gray-900"
                                        on:click=on_logout
                                    >
                                        "Logout"
                                    </button>
                                }
                            })
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}
