//! Configure-once credential store.
//!
//! Holds the API key, secret and app ID behind a single mutex. All fields
//! are written together under one lock acquisition, so readers either see
//! the full configuration or none of it.

use std::sync::Mutex;

use zeroize::Zeroize;

use crate::error::{Result, SdkError};

/// Base URL used when the caller does not supply one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Optional settings applied together with the credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkOptions {
    pub base_url: String,
    pub comments_enabled: bool,
}

impl Default for SdkOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            comments_enabled: true,
        }
    }
}

/// A consistent copy of the stored configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    pub api_key: String,
    pub api_secret: String,
    pub app_id: String,
    pub base_url: String,
    pub is_configured: bool,
    pub comments_enabled: bool,
}

impl Configuration {
    fn empty() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            app_id: String::new(),
            base_url: String::new(),
            is_configured: false,
            comments_enabled: false,
        }
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("app_id", &self.app_id)
            .field("base_url", &self.base_url)
            .field("is_configured", &self.is_configured)
            .field("comments_enabled", &self.comments_enabled)
            .finish()
    }
}

/// Mutex-guarded configuration shared by the API client and use cases.
pub struct ConfigStore {
    inner: Mutex<Configuration>,
}

impl ConfigStore {
    /// Create an empty, unconfigured store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Configuration::empty()),
        }
    }

    /// Configure with default options.
    pub fn configure(&self, api_key: &str, api_secret: &str, app_id: &str) -> Result<()> {
        self.configure_with_options(api_key, api_secret, app_id, SdkOptions::default())
    }

    /// Store credentials and options atomically.
    ///
    /// Fails with `AlreadyConfigured` if a previous call succeeded and no
    /// `reset()` happened since. Empty credentials are rejected before
    /// anything is written.
    pub fn configure_with_options(
        &self,
        api_key: &str,
        api_secret: &str,
        app_id: &str,
        options: SdkOptions,
    ) -> Result<()> {
        let mut guard = self.lock();
        if guard.is_configured {
            log::warn!("configure() called twice, keeping the first configuration");
            return Err(SdkError::AlreadyConfigured);
        }

        let api_key = api_key.trim();
        let api_secret = api_secret.trim();
        let app_id = app_id.trim();
        if api_key.is_empty() {
            return Err(SdkError::InvalidApiKey);
        }
        if api_secret.is_empty() {
            return Err(SdkError::InvalidApiSecret);
        }
        if app_id.is_empty() {
            return Err(SdkError::InvalidAppId);
        }

        *guard = Configuration {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            app_id: app_id.to_string(),
            base_url: options.base_url.trim_end_matches('/').to_string(),
            is_configured: true,
            comments_enabled: options.comments_enabled,
        };

        log::info!("SDK configured for app {}", guard.app_id);
        Ok(())
    }

    /// Fail with `NotConfigured` unless `configure` has succeeded.
    pub fn validate_configuration(&self) -> Result<()> {
        if self.lock().is_configured {
            Ok(())
        } else {
            Err(SdkError::NotConfigured)
        }
    }

    /// Copy of the current configuration, or `NotConfigured`.
    pub fn snapshot(&self) -> Result<Configuration> {
        let guard = self.lock();
        if !guard.is_configured {
            return Err(SdkError::NotConfigured);
        }
        Ok(guard.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.lock().is_configured
    }

    /// Clear every field. The secret is wiped before being dropped.
    pub fn reset(&self) {
        let mut guard = self.lock();
        guard.api_secret.zeroize();
        *guard = Configuration::empty();
        log::info!("SDK configuration reset");
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Configuration> {
        // A panic while holding the lock cannot leave a half-written
        // configuration behind, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
