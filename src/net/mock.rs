//! Queued mock transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;

use super::api::{ApiRequest, ApiResponse, Transport};
use super::error::ApiError;

/// Transport that answers from a queue and records every request.
/// Clones share the queue, so tests keep a handle for assertions after
/// moving one into the client. An exhausted queue answers `200` with a
/// null body, which keeps reconcile refetches out of the way of tests
/// that do not care about them.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Rc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    queue: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an HTTP response.
    pub fn respond(&self, status: u16, body: Value) {
        self.inner.queue.borrow_mut().push_back(Ok(ApiResponse {
            status,
            status_text: status_text(status).to_owned(),
            body,
        }));
    }

    /// Queue a transport-level failure.
    pub fn respond_network_error(&self, message: &str) {
        self.inner
            .queue
            .borrow_mut()
            .push_back(Err(ApiError::Network(message.to_owned())));
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.inner.requests.borrow().last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.inner.requests.borrow_mut().push(req);
        self.inner.queue.borrow_mut().pop_front().unwrap_or_else(|| {
            Ok(ApiResponse { status: 200, status_text: "OK".to_owned(), body: Value::Null })
        })
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        401 => "Unauthorized",
        404 => "Not Found",
        422 => "Unprocessable Content",
        500 => "Internal Server Error",
        _ => "",
    }
}
