//! Dashboard Page
//!
//! Three panes: groups, the selected group's feed, shortcuts.

use campus::models::Group;
use campus::shell::dashboard::{greeting, PICK_A_GROUP, SHORTCUTS};
use campus::views::GroupsView;
use leptos::*;

use crate::api::use_api;
use crate::components::{GroupFeed, GroupList};
use crate::state::{use_notices, use_session};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let session = use_session();
    let notices = use_notices();

    let groups = create_rw_signal(GroupsView::new(use_api()));
    let selected = create_rw_signal(None::<Group>);

    // Load groups on mount
    spawn_local(async move {
        let mut view = groups.get_untracked();
        let _ = view.load().await;
        notices.report_all(view.take_feedback());
        groups.set(view);
    });

    let welcome = move || {
        session
            .current
            .with(|current| greeting(current.as_ref().map_or("", |s| s.user.name.as_str())))
    };

    view! {
        <div class="grid grid-cols-1 lg:grid-cols-4 gap-6">
            <GroupList groups=groups selected=selected />

            <div class="lg:col-span-2">
                {move || match selected.get() {
                    Some(group) => view! { <GroupFeed group=group /> }.into_view(),
                    None => view! {
                        <div class="bg-white rounded-xl shadow-sm p-8 text-center space-y-2">
                            <h1 class="text-2xl font-bold">{welcome.clone()}</h1>
                            <p class="text-gray-500">{PICK_A_GROUP}</p>
                        </div>
                    }
                    .into_view(),
                }}
            </div>

            <aside class="bg-white rounded-xl shadow-sm p-4 space-y-2">
                <h2 class="text-lg font-semibold">"Shortcuts"</h2>
                {SHORTCUTS
                    .iter()
                    .map(|label| view! { <div class="px-3 py-2 rounded-lg text-gray-600">{*label}</div> })
                    .collect_view()}
            </aside>
        </div>
    }
}
