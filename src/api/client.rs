//! HTTP client with API key and body signature injection.
//!
//! Every request carries `x-api-key`. Requests with a body also carry
//! `x-signature`, the HMAC-SHA256 of the body keyed with the API secret.
//! There are no retries and no caching: each call is one round trip.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::endpoint::Endpoint;
use super::signature::{sign_body, API_KEY_HEADER, SIGNATURE_HEADER};
use super::transport::{HttpRequest, HttpTransport};
use crate::config::ConfigStore;
use crate::error::{Result, SdkError};

/// Signed client for the feedback backend API.
pub struct ApiClient<T> {
    transport: T,
    config: Arc<ConfigStore>,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, config: Arc<ConfigStore>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    /// Send the endpoint and return the raw success body.
    ///
    /// Fails with `NotConfigured` before any I/O if the SDK is not configured.
    pub async fn send(&self, endpoint: &Endpoint) -> Result<Vec<u8>> {
        let config = self.config.snapshot()?;
        let url = build_url(&config.base_url, &endpoint.path)?;

        let mut headers = vec![
            (API_KEY_HEADER.to_string(), config.api_key.clone()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if let Some(body) = &endpoint.body {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
            headers.push((SIGNATURE_HEADER.to_string(), sign_body(&config.api_secret, body)?));
        }

        log::debug!("{} {}", endpoint.method.as_str(), endpoint.route());

        let response = self
            .transport
            .execute(HttpRequest {
                method: endpoint.method,
                url,
                headers,
                body: endpoint.body.clone(),
            })
            .await?;

        if let Err(e) = classify_status(response.status, &response.body) {
            log::warn!(
                "{} {} failed: {}",
                endpoint.method.as_str(),
                endpoint.route(),
                e
            );
            return Err(e);
        }
        Ok(response.body)
    }

    /// Send the endpoint and decode the JSON success body as `R`.
    pub async fn send_json<R: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<R> {
        let body = self.send(endpoint).await?;
        serde_json::from_slice(&body).map_err(|e| SdkError::Decoding(e.to_string()))
    }
}

/// Join the configured base URL and a relative path, rejecting malformed
/// results.
pub fn build_url(base_url: &str, path: &str) -> Result<String> {
    let raw = format!("{}{}", base_url, path);
    match reqwest::Url::parse(&raw) {
        Ok(url) if url.has_host() => Ok(url.to_string()),
        _ => Err(SdkError::InvalidUrl(raw)),
    }
}

/// Map an HTTP status to success or the matching error.
///
/// 2xx succeeds; 401 is always `Authentication`; other 4xx and all 5xx carry
/// the body text; anything else is an unexpected status.
pub fn classify_status(status: u16, body: &[u8]) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        401 => Err(SdkError::Authentication),
        400..=499 | 500..=599 => Err(SdkError::Server {
            status_code: status,
            message: String::from_utf8_lossy(body).into_owned(),
        }),
        _ => Err(SdkError::Server {
            status_code: status,
            message: "Unexpected error".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::Deserialize;

    use super::*;
    use crate::api::endpoint::Method;
    use crate::api::transport::HttpResponse;
    use crate::testing::{configured_store, SpyTransport, TEST_API_KEY, TEST_API_SECRET};

    fn client(spy: &Arc<SpyTransport>) -> ApiClient<Arc<SpyTransport>> {
        ApiClient::new(Arc::clone(spy), configured_store())
    }

    #[test]
    fn test_status_mapping_is_total() {
        for status in 100u16..=599 {
            let result = classify_status(status, b"body");
            match status {
                200..=299 => assert!(result.is_ok(), "{}", status),
                401 => assert_eq!(result, Err(SdkError::Authentication)),
                400..=499 | 500..=599 => assert_eq!(
                    result,
                    Err(SdkError::Server {
                        status_code: status,
                        message: "body".into()
                    })
                ),
                _ => assert_eq!(
                    result,
                    Err(SdkError::Server {
                        status_code: status,
                        message: "Unexpected error".into()
                    })
                ),
            }
        }
    }

    #[test]
    fn test_401_ignores_body() {
        let body = br#"{"error":"unauthorized","message":"bad key"}"#;
        assert_eq!(classify_status(401, body), Err(SdkError::Authentication));
    }

    #[test]
    fn test_build_url() {
        let url = build_url(
            "https://feedback.example.com/api",
            "/v1/sdk/votes/status?suggestionId=s-1",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://feedback.example.com/api/v1/sdk/votes/status?suggestionId=s-1"
        );
        assert!(matches!(
            build_url("not a url", "/v1/sdk/votes/status"),
            Err(SdkError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_not_configured_fails_before_io() {
        let spy = Arc::new(SpyTransport::new());
        let client = ApiClient::new(Arc::clone(&spy), Arc::new(ConfigStore::new()));

        let err = client.send(&Endpoint::get("/v1/sdk/suggestions/fetch")).await.unwrap_err();
        assert_eq!(err, SdkError::NotConfigured);
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_carries_api_key_without_signature() {
        let spy = Arc::new(SpyTransport::new());
        spy.push_json(200, r#"{"hasVoted":true,"voteCount":3}"#);

        let body = client(&spy)
            .send(&Endpoint::get("/v1/sdk/votes/status").with_query("suggestionId", "s-1"))
            .await
            .unwrap();
        assert_eq!(body, br#"{"hasVoted":true,"voteCount":3}"#.to_vec());

        let request = spy.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url,
            "https://feedback.example.com/api/v1/sdk/votes/status?suggestionId=s-1"
        );
        assert_eq!(request.header("x-api-key"), Some(TEST_API_KEY));
        assert_eq!(request.header("x-signature"), None);
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_post_is_signed_over_exact_body() {
        let spy = Arc::new(SpyTransport::new());
        spy.push_json(200, r#"{"success":true}"#);

        let endpoint = Endpoint::post_json(
            "/v1/sdk/comments/delete",
            &serde_json::json!({"commentId": "c-1", "deviceId": "d-1"}),
        )
        .unwrap();
        client(&spy).send(&endpoint).await.unwrap();

        let request = spy.last_request().unwrap();
        let body = request.body.clone().unwrap();
        assert_eq!(Some(body.clone()), endpoint.body);
        assert_eq!(
            request.header("x-signature").map(str::to_string),
            Some(sign_body(TEST_API_SECRET, &body).unwrap())
        );
        assert_eq!(request.header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_server_error_carries_body_text() {
        let spy = Arc::new(SpyTransport::new());
        spy.push(HttpResponse {
            status: 500,
            body: b"boom".to_vec(),
        });

        let err = client(&spy)
            .send(&Endpoint::get("/v1/sdk/suggestions/fetch"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SdkError::Server {
                status_code: 500,
                message: "boom".into()
            }
        );
    }

    #[tokio::test]
    async fn test_decoding_error_is_distinct() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Expected {
            suggestions: Vec<String>,
        }

        let spy = Arc::new(SpyTransport::new());
        spy.push_json(200, r#"{"suggestions": 7}"#);

        let err = client(&spy)
            .send_json::<Expected>(&Endpoint::get("/v1/sdk/suggestions/fetch"))
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Decoding(_)));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let spy = Arc::new(SpyTransport::new());
        spy.push_error(SdkError::Unknown("connection reset".into()));

        let err = client(&spy)
            .send(&Endpoint::get("/v1/sdk/suggestions/fetch"))
            .await
            .unwrap_err();
        assert_eq!(err, SdkError::Unknown("connection reset".into()));
    }
}
