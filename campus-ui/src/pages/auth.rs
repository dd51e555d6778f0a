//! Login and Register Pages
//!
//! Both pages post credentials, store the returned user as the session and
//! go to the dashboard. On failure the server's message is shown inline and
//! the session is left as it was.

use campus::api::ClientResult;
use campus::models::{LoginRequest, RegisterRequest, User};
use campus::routing::Route;
use campus::shell::auth::{LOGIN_FAILED, LOGIN_LABELS, REGISTER_FAILED, REGISTER_LABELS};
use campus::views::require_text;
use leptos::*;
use leptos_router::*;
use std::future::Future;

use crate::api::use_api;
use crate::state::{use_session, SessionState};

/// Run one submission: pending flag, request, then sign-in and redirect or an
/// inline error
fn submit<F, N>(
    request: F,
    generic: &'static str,
    session: SessionState,
    navigate: N,
    set_pending: WriteSignal<bool>,
    set_error: WriteSignal<Option<String>>,
) where
    F: Future<Output = ClientResult<User>> + 'static,
    N: Fn(&str, NavigateOptions) + 'static,
{
    set_error.set(None);
    set_pending.set(true);

    spawn_local(async move {
        match request.await {
            Ok(user) => match session.sign_in(user) {
                Ok(_) => navigate(Route::Dashboard.path(), Default::default()),
                Err(e) => set_error.set(Some(e.to_string())),
            },
            Err(e) => set_error.set(Some(e.user_message(generic))),
        }
        set_pending.set(false);
    });
}

#[component]
pub fn Register() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (pending, set_pending) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let (Ok(name), Ok(email), Ok(_)) = (
            require_text("Name", &name.get_untracked()),
            require_text("Email", &email.get_untracked()),
            require_text("Password", &password.get_untracked()),
        ) else {
            return;
        };
        let request = RegisterRequest {
            name,
            email,
            password: password.get_untracked(),
        };
        let api = api.clone();
        submit(
            async move { api.register(&request).await },
            REGISTER_FAILED,
            session.clone(),
            navigate.clone(),
            set_pending,
            set_error,
        );
    };

    view! {
        <AuthCard title="Create your account">
            <form on:submit=on_submit class="space-y-4">
                <TextField label="Name" kind="text" value=name set_value=set_name />
                <TextField label="Email" kind="email" value=email set_value=set_email />
                <TextField label="Password" kind="password" value=password set_value=set_password />
                <InlineError error=error />
                <SubmitButton pending=pending label=move || REGISTER_LABELS.pick(pending.get()) />
            </form>
            <p class="text-sm text-gray-500 mt-4">
                "Already have an account? " <A href=Route::Login.path() class="text-indigo-600">"Sign in"</A>
            </p>
        </AuthCard>
    }
}

#[component]
pub fn Login() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (pending, set_pending) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let (Ok(email), Ok(_)) = (
            require_text("Email", &email.get_untracked()),
            require_text("Password", &password.get_untracked()),
        ) else {
            return;
        };
        let request = LoginRequest {
            email,
            password: password.get_untracked(),
        };
        let api = api.clone();
        submit(
            async move { api.login(&request).await },
            LOGIN_FAILED,
            session.clone(),
            navigate.clone(),
            set_pending,
            set_error,
        );
    };

    view! {
        <AuthCard title="Welcome back">
            <form on:submit=on_submit class="space-y-4">
                <TextField label="Email" kind="email" value=email set_value=set_email />
                <TextField label="Password" kind="password" value=password set_value=set_password />
                <InlineError error=error />
                <SubmitButton pending=pending label=move || LOGIN_LABELS.pick(pending.get()) />
            </form>
            <p class="text-sm text-gray-500 mt-4">
                "New here? " <A href=Route::Register.path() class="text-indigo-600">"Create an account"</A>
            </p>
        </AuthCard>
    }
}

#[component]
fn AuthCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="max-w-md mx-auto bg-white rounded-xl shadow-sm p-8">
            <h1 class="text-2xl font-bold mb-6">{title}</h1>
            {children()}
        </div>
    }
}

#[component]
fn TextField(
    label: &'static str,
    kind: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="text-sm text-gray-600">{label}</span>
            <input
                type=kind
                class="mt-1 w-full px-3 py-2 border rounded-lg"
                prop:value=value
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
fn InlineError(error: ReadSignal<Option<String>>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|message| view! { <p class="text-sm text-red-600">{message}</p> })
    }
}

#[component]
fn SubmitButton<L>(pending: ReadSignal<bool>, label: L) -> impl IntoView
where
    L: Fn() -> &'static str + 'static,
{
    view! {
        <button
            type="submit"
            class="w-full py-2 bg-indigo-600 text-white rounded-lg disabled:opacity-50"
            disabled=pending
        >
            {label}
        </button>
    }
}
