//! Composition root: picks concrete backends from configuration.

use seteuk_config::AppConfig;
use seteuk_core::{DocumentStore, KeyValueStore};
use seteuk_engine::{
    CredentialStore, KnowledgeBaseResolver, LengthAudit, RecordGenerator,
};
use seteuk_providers::GeminiProvider;
use seteuk_storage::{DirectoryDocumentStore, FileStore, HttpDocumentStore};
use std::sync::Arc;
use tracing::debug;

pub struct Runtime {
    pub config: AppConfig,
    pub storage: Arc<dyn KeyValueStore>,
}

impl Runtime {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage.path.clone()));
        debug!(backend = storage.name(), "Storage ready");
        Ok(Self { config, storage })
    }

    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::new(self.storage.clone())
    }

    /// Configured key first, then the stored one.
    pub fn credential(&self) -> Option<String> {
        self.credentials().resolve(self.config.api_key.as_deref())
    }

    pub fn documents(&self) -> Arc<dyn DocumentStore> {
        let source = &self.config.documents.source;
        if self.config.documents.is_remote() {
            Arc::new(HttpDocumentStore::new(source.clone()))
        } else {
            Arc::new(DirectoryDocumentStore::new(source.clone()))
        }
    }

    pub fn record_generator(&self) -> RecordGenerator {
        let generator = Arc::new(GeminiProvider::from_config(&self.config.provider));
        RecordGenerator::new(
            generator,
            KnowledgeBaseResolver::new(self.documents()),
            self.config.model.clone(),
        )
        .with_temperature(self.config.temperature)
        .with_inspector(Arc::new(LengthAudit))
    }
}
