//! HTTP transport seam shared by the token broker and the translator client.
//!
//! Production code goes through [`ReqwestTransport`]; tests inject a
//! [`StaticTransport`] with canned responses so nothing touches the network.

use async_trait::async_trait;

pub mod client;
pub mod stub;

pub use client::ReqwestTransport;
pub use stub::{RecordedRequest, StaticTransport};

/// Boxed transport-level failure (connect, DNS, TLS, read).
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// A response with the body fully read. Translator payloads are small.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP surface: one GET for Ajax endpoint calls, one form POST for
/// the token fetch. No retries, no redirects tuning, no streaming.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;

    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;
}
