//! User-facing failure reports
//!
//! Dispatches [`Feedback`] by its policy: inline messages stay with their
//! form, alerts block, and everything else becomes a toast.

use campus::views::{FailurePolicy, Feedback};
use leptos::*;

/// How long a toast stays up
const TOAST_MS: u32 = 5000;

#[derive(Clone, Copy)]
pub struct Notices {
    pub toast: RwSignal<Option<String>>,
}

impl Notices {
    /// Report a failure. Inline feedback is the form's job and is ignored here.
    pub fn report(&self, feedback: Feedback) {
        match feedback.policy {
            FailurePolicy::Inline => {}
            FailurePolicy::Alert => alert(&feedback.message),
            FailurePolicy::Notify => {
                web_sys::console::warn_1(&feedback.message.clone().into());
                self.notify(&feedback.message);
            }
        }
    }

    /// Report whatever a view left behind after a request
    pub fn report_all(&self, feedback: impl IntoIterator<Item = Feedback>) {
        for item in feedback {
            self.report(item);
        }
    }

    /// Show a toast (auto-clears after timeout)
    pub fn notify(&self, message: &str) {
        self.toast.set(Some(message.to_string()));

        let toast = self.toast;
        gloo_timers::callback::Timeout::new(TOAST_MS, move || {
            toast.set(None);
        })
        .forget();
    }

    pub fn dismiss(&self) {
        self.toast.set(None);
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn provide_notices() {
    provide_context(Notices {
        toast: create_rw_signal(None),
    });
}

pub fn use_notices() -> Notices {
    expect_context::<Notices>()
}
