//! Signed network layer for the feedback backend.
//!
//! Provides the HTTP transport seam, endpoint shaping, HMAC body signing,
//! status-code classification and request/response types matching the
//! backend API.

pub mod client;
pub mod endpoint;
pub mod signature;
pub mod transport;
pub mod types;

pub use client::{classify_status, ApiClient};
pub use endpoint::{Endpoint, Method};
pub use signature::sign_body;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
