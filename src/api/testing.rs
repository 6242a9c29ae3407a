//! In-memory transport for exercising the client without a network.

use crate::api::traits::Transport;
use crate::api::types::{ApiRequest, ApiResponse};
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync>;

/// Answers every request through a closure and records what it was sent
pub struct FakeTransport {
    responder: Responder,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(move |request: &ApiRequest| Ok(respond(request))),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request fails before reaching a server
    pub fn failing(reason: &str) -> Self {
        let reason = reason.to_string();
        Self {
            responder: Box::new(move |_: &ApiRequest| Err(ApiError::Transport(reason.clone()))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Number of requests sent to `path`
    pub fn count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }
}
