//! Shared test doubles and fixtures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::endpoint::Endpoint;
use crate::api::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::api::types::{Comment, Suggestion, SuggestionSource, SuggestionStatus};
use crate::config::{ConfigStore, SdkOptions};
use crate::context::SdkContext;
use crate::device::{DeviceIdentityProvider, Platform};
use crate::error::{Result, SdkError};
use crate::storage::{MemoryStore, PreferenceStore};

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_API_SECRET: &str = "test-secret";
pub const TEST_APP_ID: &str = "app-1";
pub const TEST_BASE_URL: &str = "https://feedback.example.com/api";

pub fn configured_store() -> Arc<ConfigStore> {
    let store = ConfigStore::new();
    store
        .configure_with_options(
            TEST_API_KEY,
            TEST_API_SECRET,
            TEST_APP_ID,
            SdkOptions {
                base_url: TEST_BASE_URL.to_string(),
                comments_enabled: true,
            },
        )
        .unwrap();
    Arc::new(store)
}

/// Context over `config` with an in-memory preference store, iOS, English.
pub fn test_context(config: Arc<ConfigStore>) -> Arc<SdkContext> {
    let preferences: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
    let device =
        DeviceIdentityProvider::with_metadata(Arc::clone(&preferences), Platform::Ios, "en".into());
    Arc::new(SdkContext::with_device(config, Arc::new(device), preferences))
}

/// Decoded query parameters of `endpoint`, in order.
pub fn query_pairs(endpoint: &Endpoint) -> Vec<(String, String)> {
    let url = reqwest::Url::parse(&format!("{}{}", TEST_BASE_URL, endpoint.path)).unwrap();
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn query_value(endpoint: &Endpoint, key: &str) -> Option<String> {
    query_pairs(endpoint)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// JSON body of a recorded request.
pub fn json_body(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_slice(request.body.as_deref().unwrap_or_default()).unwrap()
}

// ── Spy Transport ─────────────────────────────────────────────────────────

/// Transport that records requests and replays canned responses in order.
///
/// With no canned response left it answers `200 {}`.
pub struct SpyTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicU32,
}

impl SpyTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicU32::new(0),
        }
    }

    pub fn push(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_json(&self, status: u16, body: &str) {
        self.push(HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
        });
    }

    pub fn push_error(&self, error: SdkError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl HttpTransport for SpyTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(HttpResponse {
                    status: 200,
                    body: b"{}".to_vec(),
                })
            })
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────────

pub fn suggestion(id: &str, vote_count: i64, created_at: &str) -> Suggestion {
    Suggestion {
        id: id.to_string(),
        app_id: TEST_APP_ID.to_string(),
        title: Some(format!("Suggestion {}", id)),
        text: None,
        description: None,
        status: SuggestionStatus::Pending,
        source: SuggestionSource::Sdk,
        vote_count,
        comment_count: 0,
        created_by: "device-test".to_string(),
        device_id: Some("device-test".to_string()),
        nickname: None,
        platform: Some("iOS".to_string()),
        language: Some("en".to_string()),
        created_at: created_at.to_string(),
        updated_at: created_at.to_string(),
    }
}

/// `count` suggestions with descending vote counts and distinct timestamps.
pub fn suggestions(prefix: &str, count: usize) -> Vec<Suggestion> {
    (0..count)
        .map(|i| {
            suggestion(
                &format!("{}-{}", prefix, i),
                (count - i) as i64,
                &format!("2024-05-01T10:{:02}:00.000Z", i),
            )
        })
        .collect()
}

pub fn comment(id: &str, suggestion_id: &str, created_at: &str) -> Comment {
    Comment {
        id: id.to_string(),
        suggestion_id: suggestion_id.to_string(),
        app_id: TEST_APP_ID.to_string(),
        text: format!("Comment {}", id),
        created_by: "device-test".to_string(),
        device_id: Some("device-test".to_string()),
        nickname: None,
        created_at: created_at.to_string(),
        updated_at: None,
    }
}

pub fn comments(suggestion_id: &str, count: usize) -> Vec<Comment> {
    (0..count)
        .map(|i| {
            comment(
                &format!("c-{}", i),
                suggestion_id,
                &format!("2024-05-01T11:{:02}:00.000Z", i),
            )
        })
        .collect()
}
