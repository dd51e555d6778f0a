//! Login and registration forms
//!
//! Both forms submit credentials, store the returned user as the session and
//! redirect to the dashboard. A failure leaves the session alone and shows
//! the server's message inline.

use thiserror::Error;

use crate::api::{ApiClient, ClientError};
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::routing::{Admission, Route};
use crate::session::{SessionContext, SessionError};
use crate::views::{require_text, FailurePolicy, Feedback};

pub const REGISTER_FAILED: &str = "Registration failed";
pub const LOGIN_FAILED: &str = "Login failed";

/// Submit button text, idle and while the request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitLabels {
    pub idle: &'static str,
    pub pending: &'static str,
}

impl SubmitLabels {
    pub fn pick(&self, pending: bool) -> &'static str {
        if pending {
            self.pending
        } else {
            self.idle
        }
    }
}

pub const REGISTER_LABELS: SubmitLabels = SubmitLabels {
    idle: "Create account",
    pending: "Creating account...",
};

pub const LOGIN_LABELS: SubmitLabels = SubmitLabels {
    idle: "Sign in",
    pending: "Signing in...",
};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Could not store session: {0}")]
    Session(#[from] SessionError),
}

/// Shared submit bookkeeping: pending flag and the inline error
#[derive(Debug, Default, Clone)]
struct FormStatus {
    pending: bool,
    error: Option<Feedback>,
}

impl FormStatus {
    fn begin(&mut self) {
        self.error = None;
        self.pending = true;
    }

    /// Store the session on success, or record the inline message
    fn finish(
        &mut self,
        outcome: Result<User, ClientError>,
        session: &SessionContext,
        generic: &str,
    ) -> Result<Admission, AuthError> {
        self.pending = false;
        match outcome {
            Ok(user) => match session.sign_in(user) {
                Ok(_) => Ok(Admission::Redirect(Route::Dashboard)),
                Err(e) => {
                    self.error = Some(Feedback::new(FailurePolicy::Inline, e.to_string()));
                    Err(e.into())
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "{}", generic);
                self.error = Some(Feedback::from_error(FailurePolicy::Inline, &e, generic));
                Err(e.into())
            }
        }
    }
}

/// Registration form: name, email, password
#[derive(Debug, Default, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    status: FormStatus,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.status.pending
    }

    pub fn submit_label(&self) -> &'static str {
        REGISTER_LABELS.pick(self.status.pending)
    }

    /// Inline error text from the last attempt
    pub fn error(&self) -> Option<&str> {
        self.status.error.as_ref().map(|f| f.message.as_str())
    }

    fn validate(&self) -> Result<RegisterRequest, ClientError> {
        Ok(RegisterRequest {
            name: require_text("Name", &self.name)?,
            email: require_text("Email", &self.email)?,
            // Passwords are sent as typed
            password: {
                require_text("Password", &self.password)?;
                self.password.clone()
            },
        })
    }

    /// Submit the form. An incomplete form issues no request.
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        session: &SessionContext,
    ) -> Result<Admission, AuthError> {
        let request = self.validate()?;
        self.status.begin();
        let outcome = api.register(&request).await;
        self.status.finish(outcome, session, REGISTER_FAILED)
    }
}

/// Login form: email, password
#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    status: FormStatus,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.status.pending
    }

    pub fn submit_label(&self) -> &'static str {
        LOGIN_LABELS.pick(self.status.pending)
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error.as_ref().map(|f| f.message.as_str())
    }

    fn validate(&self) -> Result<LoginRequest, ClientError> {
        Ok(LoginRequest {
            email: require_text("Email", &self.email)?,
            password: {
                require_text("Password", &self.password)?;
                self.password.clone()
            },
        })
    }

    pub async fn submit(
        &mut self,
        api: &ApiClient,
        session: &SessionContext,
    ) -> Result<Admission, AuthError> {
        let request = self.validate()?;
        self.status.begin();
        let outcome = api.login(&request).await;
        self.status.finish(outcome, session, LOGIN_FAILED)
    }
}
