//! Per-install device identity.
//!
//! The device ID is the only actor identity for SDK-originated votes,
//! suggestions and comments. It is generated once and persisted in the
//! preference store; persistence failures fall back to an ephemeral ID
//! for the lifetime of this provider.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::storage::{PreferenceStore, DEVICE_ID_KEY};

/// Platform reported alongside SDK-originated content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Platform {
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "iPadOS")]
    IpadOs,
    #[serde(rename = "macOS")]
    MacOs,
    #[serde(rename = "tvOS")]
    TvOs,
    #[serde(rename = "watchOS")]
    WatchOs,
    #[serde(rename = "visionOS")]
    VisionOs,
    #[serde(rename = "android")]
    Android,
    #[serde(rename = "linux")]
    Linux,
    #[serde(rename = "windows")]
    Windows,
}

impl Platform {
    /// Platform of the compile target.
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "tvos") {
            Platform::TvOs
        } else if cfg!(target_os = "watchos") {
            Platform::WatchOs
        } else if cfg!(target_os = "visionos") {
            Platform::VisionOs
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::IpadOs => "iPadOS",
            Platform::MacOs => "macOS",
            Platform::TvOs => "tvOS",
            Platform::WatchOs => "watchOS",
            Platform::VisionOs => "visionOS",
            Platform::Android => "android",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }
}

/// ISO 639 language code from a POSIX locale string like `de_DE.UTF-8`.
pub fn language_from_locale(locale: &str) -> Option<String> {
    let code: String = locale
        .split(|c: char| c == '_' || c == '-' || c == '.' || c == '@')
        .next()?
        .to_ascii_lowercase();
    if code.len() < 2 || code.len() > 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(code)
}

/// Language from `LC_ALL` / `LANG`, defaulting to `en`.
pub fn current_language() -> String {
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|locale| language_from_locale(&locale))
        .unwrap_or_else(|| "en".to_string())
}

/// Snapshot of the metadata attached to SDK requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub device_id: String,
    pub platform: Platform,
    pub language: String,
}

/// Lazily generates and persists the device ID.
pub struct DeviceIdentityProvider {
    store: Arc<dyn PreferenceStore>,
    cached: Mutex<Option<String>>,
    platform: Platform,
    language: String,
}

impl DeviceIdentityProvider {
    /// Provider for the current platform and environment language.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self::with_metadata(store, Platform::current(), current_language())
    }

    pub fn with_metadata(
        store: Arc<dyn PreferenceStore>,
        platform: Platform,
        language: String,
    ) -> Self {
        Self {
            store,
            cached: Mutex::new(None),
            platform,
            language,
        }
    }

    /// The persisted device ID, generating one on first access.
    pub fn device_id(&self) -> String {
        let mut cached = self.lock();
        if let Some(id) = cached.as_ref() {
            return id.clone();
        }

        let id = match self.store.get(DEVICE_ID_KEY) {
            Ok(Some(id)) if !id.trim().is_empty() => id,
            Ok(_) => self.generate_and_persist(),
            Err(e) => {
                log::warn!("Failed to read device ID: {}. Generating a new one.", e);
                self.generate_and_persist()
            }
        };
        *cached = Some(id.clone());
        id
    }

    /// Create, persist and return a fresh device ID.
    pub fn generate_new_device_id(&self) -> String {
        let mut cached = self.lock();
        let id = self.generate_and_persist();
        *cached = Some(id.clone());
        id
    }

    /// Forget the device ID. The next `device_id()` call regenerates it.
    pub fn reset_device_id(&self) {
        let mut cached = self.lock();
        *cached = None;
        if let Err(e) = self.store.remove(DEVICE_ID_KEY) {
            log::warn!("Failed to remove device ID: {}", e);
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity {
            device_id: self.device_id(),
            platform: self.platform,
            language: self.language.clone(),
        }
    }

    fn generate_and_persist(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        if let Err(e) = self.store.set(DEVICE_ID_KEY, &id) {
            log::warn!("Failed to store device ID: {}. Using ephemeral ID.", e);
        }
        log::info!("Generated new device ID");
        id
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.cached.lock().unwrap_or_else(|e| e.into_inner())
    }
}
