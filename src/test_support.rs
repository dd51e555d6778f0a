//! Test doubles shared by the unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::api::{ApiClient, ApiRequest, ApiResponse, ClientError, ClientResult, Transport};
use crate::models::{Id, Session, User};

/// Transport that replays queued responses in order and records every
/// request it was given.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<ClientResult<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, reason: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ClientError::Transport(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted response".to_string())))
    }
}

pub fn client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    ApiClient::new(transport.clone())
}

pub fn user(id: &str, name: &str) -> User {
    User {
        id: Id::new(id),
        name: name.to_string(),
        email: format!("{}@school.edu", name.to_lowercase()),
    }
}

pub fn session(id: &str, name: &str) -> Session {
    Session::new(user(id, name))
}
