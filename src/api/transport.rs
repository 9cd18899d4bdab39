//! HTTP transport seam.
//!
//! The API client talks to the network only through `HttpTransport`, so
//! tests can substitute a recording double for the reqwest implementation.

use std::sync::Arc;

use reqwest::Client;

use super::endpoint::Method;
use crate::error::{Result, SdkError};

/// A fully built request: absolute URL, headers and raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// First header value named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends one request and returns the raw status and body.
///
/// Implementations do not interpret the status code; non-2xx responses are
/// returned as `Ok`. Connection-level failures map to `SdkError`.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<T: HttpTransport> HttpTransport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.as_ref().execute(request).await
    }
}

/// Production transport on top of a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("featurevote-sdk/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_builder() {
                SdkError::InvalidUrl(request.url.clone())
            } else {
                SdkError::Unknown(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(|e| {
            log::warn!("Failed to read response body ({}): {}", status, e);
            SdkError::InvalidResponse
        })?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
