//! Endpoint descriptions produced by the repositories.

use serde::Serialize;

use crate::error::{Result, SdkError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A relative API call: path (with query string), method and optional body.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub method: Method,
    pub body: Option<Vec<u8>>,
}

impl Endpoint {
    pub fn get(path: &str) -> Self {
        Self {
            path: path.to_string(),
            method: Method::Get,
            body: None,
        }
    }

    /// POST with `body` encoded as JSON.
    pub fn post_json<B: Serialize>(path: &str, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| SdkError::Unknown(format!("Failed to encode request body: {}", e)))?;
        Ok(Self {
            path: path.to_string(),
            method: Method::Post,
            body: Some(bytes),
        })
    }

    /// Append a percent-encoded query parameter.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        let separator = if self.path.contains('?') { '&' } else { '?' };
        self.path.push(separator);
        self.path.push_str(&urlencoding::encode(key));
        self.path.push('=');
        self.path.push_str(&urlencoding::encode(value));
        self
    }

    /// Append a query parameter only when `value` is present.
    pub fn with_optional_query(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with_query(key, value),
            None => self,
        }
    }

    /// Path without the query string.
    pub fn route(&self) -> &str {
        self.path.split('?').next().unwrap_or(&self.path)
    }
}
