//! Local preference storage for the device identifier and the
//! last version-report timestamp.
//!
//! `KeychainStore` persists values in the system keychain through the
//! `keyring` crate. `MemoryStore` keeps them in process memory.

use std::collections::HashMap;
use std::sync::Mutex;

use keyring::Entry;

use crate::error::StorageError;

/// Keychain service name used when the caller does not pick one.
pub const DEFAULT_SERVICE_NAME: &str = "com.featurevote.sdk";

/// Key holding the per-install device identifier.
pub const DEVICE_ID_KEY: &str = "device-id";

/// Key holding the last successful version report (Unix ms).
pub const LAST_VERSION_REPORT_KEY: &str = "last-version-report-ms";

/// String key/value persistence.
pub trait PreferenceStore: Send + Sync {
    /// Returns `None` if nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Idempotent: removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// System keychain backed store, one entry per key.
pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

impl PreferenceStore for KeychainStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entry = Entry::new(&self.service, key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let entry = Entry::new(&self.service, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let entry = Entry::new(&self.service, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::from(e)),
        }
    }
}

/// In-memory store. Values are lost when the store is dropped.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values().remove(key);
        Ok(())
    }
}

/// Read a Unix-ms timestamp stored as a decimal string.
pub fn get_timestamp(store: &dyn PreferenceStore, key: &str) -> Result<Option<u64>, StorageError> {
    match store.get(key)? {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| StorageError::Malformed {
                key: key.to_string(),
            }),
        None => Ok(None),
    }
}

pub fn set_timestamp(store: &dyn PreferenceStore, key: &str, ms: u64) -> Result<(), StorageError> {
    store.set(key, &ms.to_string())
}
