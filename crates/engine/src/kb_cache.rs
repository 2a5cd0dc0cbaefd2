//! Per-category knowledge-base cache with versioned loading.
//!
//! Layout under a category prefix:
//! - V2: `<prefix>knowledge_base_files`, a JSON list of uploaded files
//! - V1 (legacy): a single file split over `<prefix>knowledge_base_content`,
//!   `<prefix>knowledge_base_name` and `<prefix>knowledge_base_mime`
//!
//! [`KnowledgeBaseCache::load`] prefers V2; when V2 is absent it migrates V1
//! and writes V2 once.

use seteuk_core::error::StorageError;
use seteuk_core::{FileCategory, KeyValueStore, KnowledgeEntry, Result, UploadedFile};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::category::RecordCategory;

const LEGACY_DEFAULT_NAME: &str = "사용자 정의 지식 베이스";
const LEGACY_DEFAULT_MIME: &str = "application/pdf";

pub struct KnowledgeBaseCache {
    storage: Arc<dyn KeyValueStore>,
    prefix: &'static str,
}

impl KnowledgeBaseCache {
    pub fn new(storage: Arc<dyn KeyValueStore>, category: RecordCategory) -> Self {
        Self {
            storage,
            prefix: category.key_prefix(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    /// Read a key, logging and absorbing storage failures.
    fn read(&self, name: &str) -> Option<String> {
        let key = self.key(name);
        match self.storage.get(&key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read knowledge base setting");
                None
            }
        }
    }

    /// The current file list, or `None` when it was never written.
    ///
    /// A corrupt list is logged and treated as empty.
    pub fn load_v2(&self) -> Option<Vec<UploadedFile>> {
        let raw = self.read("knowledge_base_files")?;
        match serde_json::from_str(&raw) {
            Ok(files) => Some(files),
            Err(e) => {
                warn!(prefix = self.prefix, error = %e, "Stored knowledge base is corrupt, ignoring");
                Some(Vec::new())
            }
        }
    }

    /// The legacy single-file knowledge base, if present.
    pub fn load_v1(&self) -> Option<UploadedFile> {
        let content = self.read("knowledge_base_content")?;
        let name = self
            .read("knowledge_base_name")
            .unwrap_or_else(|| LEGACY_DEFAULT_NAME.to_string());
        let mime = self
            .read("knowledge_base_mime")
            .unwrap_or_else(|| LEGACY_DEFAULT_MIME.to_string());
        Some(UploadedFile::new(name, mime, content, FileCategory::Knowledge))
    }

    /// Load the cached files, migrating the legacy layout if needed.
    pub fn load(&self) -> Vec<UploadedFile> {
        if let Some(files) = self.load_v2() {
            debug!(prefix = self.prefix, count = files.len(), "Knowledge base loaded");
            return files;
        }

        let Some(legacy) = self.load_v1() else {
            return Vec::new();
        };

        let files = vec![legacy];
        match self.save(&files) {
            Ok(()) => info!(prefix = self.prefix, "Migrated legacy knowledge base"),
            Err(e) => warn!(prefix = self.prefix, error = %e, "Failed to persist migrated knowledge base"),
        }
        files
    }

    /// Cached files as generation entries.
    pub fn entries(&self) -> Vec<KnowledgeEntry> {
        self.load().iter().map(UploadedFile::to_knowledge_entry).collect()
    }

    pub fn save(&self, files: &[UploadedFile]) -> Result<()> {
        let payload = serde_json::to_string(files)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(&self.key("knowledge_base_files"), &payload)?;
        Ok(())
    }

    /// Drop the file list, the legacy triple and the subject name.
    pub fn reset(&self) -> Result<()> {
        for name in [
            "knowledge_base_files",
            "custom_subject_name",
            "knowledge_base_content",
            "knowledge_base_name",
            "knowledge_base_mime",
        ] {
            self.storage.remove(&self.key(name))?;
        }
        Ok(())
    }

    pub fn subject_name(&self) -> Option<String> {
        self.read("custom_subject_name")
    }

    pub fn set_subject_name(&self, name: Option<&str>) -> Result<()> {
        self.write_optional("custom_subject_name", name)
    }

    pub fn instructions(&self) -> Option<String> {
        self.read("custom_instructions")
    }

    pub fn set_instructions(&self, instructions: Option<&str>) -> Result<()> {
        self.write_optional("custom_instructions", instructions)
    }

    /// Blank or `None` removes the key.
    fn write_optional(&self, name: &str, value: Option<&str>) -> Result<()> {
        let key = self.key(name);
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.storage.set(&key, v)?,
            None => self.storage.remove(&key)?,
        }
        Ok(())
    }
}
