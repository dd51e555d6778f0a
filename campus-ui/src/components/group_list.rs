//! Group list and create-group form (left pane)

use campus::models::Group;
use campus::views::GroupsView;
use leptos::*;

use crate::components::loading::ListSkeleton;
use crate::state::{use_notices, use_session};

#[component]
pub fn GroupList(
    groups: RwSignal<GroupsView>,
    selected: RwSignal<Option<Group>>,
) -> impl IntoView {
    view! {
        <aside class="bg-white rounded-xl shadow-sm p-4 space-y-4">
            <h2 class="text-lg font-semibold">"Groups"</h2>
            <CreateGroup groups=groups />

            {move || {
                let (loaded, empty, list) = groups.with(|view| {
                    (view.listing().is_loaded(), view.placeholder(), view.groups().to_vec())
                });
                if !loaded {
                    return view! { <ListSkeleton /> }.into_view();
                }
                if let Some(empty) = empty {
                    return view! { <p class="text-sm text-gray-500">{empty}</p> }.into_view();
                }
                list
                    .into_iter()
                    .map(|group| {
                        let is_active = {
                            let id = group.id.clone();
                            move || selected.with(|s| s.as_ref().is_some_and(|g| g.id == id))
                        };
                        let name = group.name.clone();
                        let description = group.description.clone().unwrap_or_default();
                        view! {
                            <button
                                class="w-full text-left px-3 py-2 rounded-lg hover:bg-gray-100"
                                class:bg-indigo-50=is_active
                                on:click=move |_| selected.set(Some(group.clone()))
                            >
                                <div class="font-medium">{name}</div>
                                <div class="text-xs text-gray-500">{description}</div>
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </aside>
    }
}

#[component]
fn CreateGroup(groups: RwSignal<GroupsView>) -> impl IntoView {
    let session = use_session();
    let notices = use_notices();

    let (name, set_name) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (pending, set_pending) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let Some(current) = session.current.get_untracked() else {
            return;
        };
        let (group_name, group_description) = (name.get_untracked(), description.get_untracked());

        set_pending.set(true);
        spawn_local(async move {
            let mut view = groups.get_untracked();
            // Empty names are rejected by the view before any request
            if view.create(&current, &group_name, &group_description).await.is_ok() {
                set_name.set(String::new());
                set_description.set(String::new());
            }
            notices.report_all(view.take_feedback());
            groups.set(view);
            set_pending.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-2">
            <input
                type="text"
                placeholder="Group name"
                class="w-full px-3 py-2 border rounded-lg"
                prop:value=name
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Description (optional)"
                class="w-full px-3 py-2 border rounded-lg"
                prop:value=description
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <button
                type="submit"
                class="w-full py-2 bg-indigo-600 text-white rounded-lg disabled:opacity-50"
                disabled=pending
            >
                {move || if pending.get() { "Creating..." } else { "Create group" }}
            </button>
        </form>
    }
}
