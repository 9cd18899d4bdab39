//! Error taxonomy shared by every layer of the SDK.
//!
//! Configuration, validation and local-policy errors are raised before any
//! network I/O. Network errors are raised only by the signed API client.

use thiserror::Error;

use crate::api::types::ApiErrorBody;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SdkError {
    // ── Configuration ────────────────────────────────────────────────────
    #[error("SDK is already configured")]
    AlreadyConfigured,
    #[error("SDK is not configured, call configure() first")]
    NotConfigured,
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error("Invalid API secret")]
    InvalidApiSecret,
    #[error("Invalid app ID")]
    InvalidAppId,

    // ── Validation ───────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ── Network / transport ──────────────────────────────────────────────
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid response from server")]
    InvalidResponse,
    #[error("Failed to decode response: {0}")]
    Decoding(String),
    #[error("Authentication failed")]
    Authentication,
    #[error("Server error ({status_code}): {message}")]
    Server { status_code: u16, message: String },
    #[error("Unknown error: {0}")]
    Unknown(String),

    // ── Local policy ─────────────────────────────────────────────────────
    #[error("Too soon, retry in {retry_after_ms} ms")]
    TooSoon { retry_after_ms: u64 },
}

impl SdkError {
    /// Whether this error was raised locally without touching the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            SdkError::AlreadyConfigured
                | SdkError::NotConfigured
                | SdkError::InvalidApiKey
                | SdkError::InvalidApiSecret
                | SdkError::InvalidAppId
                | SdkError::InvalidInput(_)
                | SdkError::TooSoon { .. }
        )
    }

    /// The `message` field of a `{error, message}` server body, if the
    /// error carries one. Falls back to the raw body text.
    pub fn server_message(&self) -> Option<String> {
        match self {
            SdkError::Server { message, .. } => Some(
                serde_json::from_str::<ApiErrorBody>(message)
                    .ok()
                    .and_then(|body| body.message.or(body.error))
                    .unwrap_or_else(|| message.clone()),
            ),
            _ => None,
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        SdkError::InvalidInput(reason.into())
    }
}

/// Errors from the local preference storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Keychain operation failed: {0}")]
    Keychain(String),
    #[error("Stored value for '{key}' is malformed")]
    Malformed { key: String },
}

impl From<keyring::Error> for StorageError {
    fn from(err: keyring::Error) -> Self {
        StorageError::Keychain(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;
