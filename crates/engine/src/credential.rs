//! The persisted API key.
//!
//! Stored in plain text under a single key; securing the backing store is
//! up to whoever provides it.

use seteuk_core::{KeyValueStore, Result};
use std::sync::Arc;
use tracing::warn;

pub const CREDENTIAL_KEY: &str = "gemini_api_key";

pub struct CredentialStore {
    storage: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// The stored key, if any. Read failures count as absent.
    pub fn get(&self) -> Option<String> {
        match self.storage.get(CREDENTIAL_KEY) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read stored API key");
                None
            }
        }
    }

    pub fn set(&self, key: &str) -> Result<()> {
        self.storage.set(CREDENTIAL_KEY, key.trim())?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.remove(CREDENTIAL_KEY)?;
        Ok(())
    }

    /// An explicitly configured key wins over the stored one.
    pub fn resolve(&self, configured: Option<&str>) -> Option<String> {
        configured
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| self.get())
    }
}
