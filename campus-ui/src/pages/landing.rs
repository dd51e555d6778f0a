//! Landing Page

use campus::shell::landing::{CALLS_TO_ACTION, HEADLINE, TAGLINE};
use leptos::*;
use leptos_router::*;

#[component]
pub fn Landing() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center space-y-6">
            <h1 class="text-5xl font-bold">{HEADLINE}</h1>
            <p class="max-w-xl text-lg text-gray-600">{TAGLINE}</p>
            <div class="flex space-x-3">
                {CALLS_TO_ACTION
                    .iter()
                    .enumerate()
                    .map(|(i, (label, route))| {
                        let class = if i == 0 {
                            "px-6 py-3 bg-indigo-600 hover:bg-indigo-700 text-white rounded-lg font-medium"
                        } else {
                            "px-6 py-3 border border-gray-300 hover:bg-gray-50 rounded-lg font-medium"
                        };
                        view! { <A href=route.path() class=class>{*label}</A> }
                    })
                    .collect_view()}
            </div>
            // Static stand-in for the decorative campus scene
            <div class="w-full max-w-3xl h-64 rounded-2xl bg-gradient-to-br from-indigo-100 to-sky-100" />
        </div>
    }
}
