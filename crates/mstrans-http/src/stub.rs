use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{HttpResponse, HttpTransport, TransportError};

/// What a [`StaticTransport`] saw: method, URL, and form body if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub form: Vec<(String, String)>,
}

/// In-memory transport stub: canned responses handed out in FIFO order,
/// every issued request recorded for assertions.
#[derive(Default)]
pub struct StaticTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with the given body.
    pub fn push_ok(&self, body: impl Into<String>) {
        self.push_response(HttpResponse::ok(body));
    }

    pub fn push_response(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a transport-level failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_response(&self) -> Result<HttpResponse, TransportError> {
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(message.into()),
            None => Err("no canned response queued".into()),
        }
    }

    fn record(&self, method: &'static str, url: &str, form: &[(String, String)]) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            form: form.to_vec(),
        });
    }
}

#[async_trait]
impl HttpTransport for StaticTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.record("GET", url, &[]);
        self.next_response()
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.record("POST", url, form);
        self.next_response()
    }
}
