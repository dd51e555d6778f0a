//! Post composer and the active group's feed (middle pane)

use campus::models::Group;
use campus::views::PostsView;
use leptos::*;

use crate::api::use_api;
use crate::components::loading::ListSkeleton;
use crate::components::post_card::PostCard;
use crate::state::{use_notices, use_session};

#[component]
pub fn GroupFeed(group: Group) -> impl IntoView {
    let notices = use_notices();
    let posts = create_rw_signal(PostsView::new(use_api()));

    // One fetch per selection; the feed is rebuilt when the selection changes
    {
        let group = group.clone();
        spawn_local(async move {
            let mut view = posts.get_untracked();
            let _ = view.select(group).await;
            notices.report_all(view.take_feedback());
            posts.set(view);
        });
    }

    // Tracks only the loaded/empty state, so the keyed list below survives
    // a new post
    let status = create_memo(move |_| {
        posts.with(|view| (view.listing().is_loaded(), view.placeholder()))
    });

    view! {
        <section class="space-y-4">
            <div>
                <h2 class="text-2xl font-bold">{group.name.clone()}</h2>
                <p class="text-gray-500">{group.description.clone().unwrap_or_default()}</p>
            </div>

            <Composer posts=posts />

            {move || {
                let (loaded, empty) = status.get();
                if !loaded {
                    return view! { <ListSkeleton /> }.into_view();
                }
                if let Some(empty) = empty {
                    return view! { <p class="text-gray-500">{empty}</p> }.into_view();
                }
                view! {
                    <For
                        each=move || posts.with(|view| view.posts().to_vec())
                        key=|post| post.id.clone()
                        children=|post| view! { <PostCard post=post /> }
                    />
                }
                .into_view()
            }}
        </section>
    }
}

#[component]
fn Composer(posts: RwSignal<PostsView>) -> impl IntoView {
    let session = use_session();
    let notices = use_notices();

    let (content, set_content) = create_signal(String::new());
    let (pending, set_pending) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = session.current.get_untracked() else {
            return;
        };
        let text = content.get_untracked();

        set_pending.set(true);
        spawn_local(async move {
            let mut view = posts.get_untracked();
            if view.create(&current, &text).await.is_ok() {
                set_content.set(String::new());
            }
            notices.report_all(view.take_feedback());
            posts.set(view);
            set_pending.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="bg-white rounded-xl shadow-sm p-4 space-y-2">
            <textarea
                rows="3"
                placeholder="Share something with the group"
                class="w-full px-3 py-2 border rounded-lg"
                prop:value=content
                on:input=move |ev| set_content.set(event_target_value(&ev))
            />
            <div class="flex justify-end">
                <button
                    type="submit"
                    class="px-4 py-2 bg-indigo-600 text-white rounded-lg disabled:opacity-50"
                    disabled=pending
                >
                    {move || if pending.get() { "Posting..." } else { "Post" }}
                </button>
            </div>
        </form>
    }
}
