//! Toast Notification Component

use leptos::*;

use crate::state::use_notices;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let notices = use_notices();

    view! {
        <div class="fixed bottom-6 right-4 z-50">
            {move || {
                notices.toast.get().map(|message| view! {
                    <div class="flex items-center space-x-3 bg-red-600 text-white px-4 py-3 rounded-lg shadow-lg">
                        <span class="text-lg">"✕"</span>
                        <span class="text-sm font-medium">{message}</span>
                        <button class="ml-2 text-white/80 hover:text-white" on:click=move |_| notices.dismiss()>
                            "Dismiss"
                        </button>
                    </div>
                })
            }}
        </div>
    }
}
