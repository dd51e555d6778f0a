//! A post with its likes and comments

use campus::models::Post;
use campus::shell::dashboard::PostThread;
use leptos::*;

use crate::api::use_api;
use crate::state::{use_notices, use_session};

#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let session = use_session();
    let notices = use_notices();

    let thread = create_rw_signal(PostThread::for_post(&use_api(), &post));

    // Like count always, comments only when the post did not embed them
    spawn_local(async move {
        let mut current = thread.get_untracked();
        current.mount().await;
        notices.report_all(current.drain_feedback());
        thread.set(current);
    });

    let like_session = session.clone();
    let on_like = move |_| {
        let Some(me) = like_session.current.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let mut current = thread.get_untracked();
            let _ = current.likes.like(&me).await;
            notices.report_all(current.drain_feedback());
            thread.set(current);
        });
    };

    let (draft, set_draft) = create_signal(String::new());
    let on_comment = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(me) = session.current.get_untracked() else {
            return;
        };
        let text = draft.get_untracked();
        spawn_local(async move {
            let mut current = thread.get_untracked();
            // The view posts, then replaces the list with a fresh fetch
            if current.comments.create(&me, &text).await.is_ok() {
                set_draft.set(String::new());
            }
            notices.report_all(current.drain_feedback());
            thread.set(current);
        });
    };

    view! {
        <article class="bg-white rounded-xl shadow-sm p-4 space-y-3">
            <div class="text-xs text-gray-500">{post.author_id.to_string()}</div>
            <p class="whitespace-pre-wrap">{post.content.clone()}</p>

            <button class="text-sm text-indigo-600 hover:underline" on:click=on_like>
                {move || thread.with(|t| t.likes.label())}
            </button>

            <div class="border-t pt-3 space-y-2">
                {move || {
                    let (empty, comments) = thread
                        .with(|t| (t.comments.placeholder(), t.comments.comments().to_vec()));
                    if let Some(empty) = empty {
                        return view! { <p class="text-sm text-gray-400">{empty}</p> }.into_view();
                    }
                    comments
                        .into_iter()
                        .map(|comment| view! {
                            <div class="text-sm">
                                <span class="font-medium mr-2">{comment.author_id.to_string()}</span>
                                <span>{comment.content}</span>
                            </div>
                        })
                        .collect_view()
                }}

                <form on:submit=on_comment class="flex space-x-2">
                    <input
                        type="text"
                        placeholder="Write a comment"
                        class="flex-1 px-3 py-1 border rounded-lg text-sm"
                        prop:value=draft
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    />
                    <button type="submit" class="px-3 py-1 text-sm bg-gray-100 rounded-lg">"Send"</button>
                </form>
            </div>
        </article>
    }
}
