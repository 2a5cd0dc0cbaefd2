//! Bounded, persisted history of generated records.
//!
//! One store per storage key. The in-memory sequence is the source of truth;
//! every mutation rewrites the full snapshot under the key. Persistence
//! failures are logged and never surfaced.

use chrono::Utc;
use seteuk_core::{GeneratedResult, HistoryItem, KeyValueStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum number of retained items.
pub const HISTORY_CAP: usize = 50;

/// Fields replaced by [`HistoryStore::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct HistoryUpdate {
    pub result: Option<GeneratedResult>,
    pub summary: Option<String>,
}

impl HistoryUpdate {
    pub fn result(result: GeneratedResult) -> Self {
        Self {
            result: Some(result),
            summary: None,
        }
    }
}

pub struct HistoryStore {
    key: String,
    storage: Arc<dyn KeyValueStore>,
    items: Vec<HistoryItem>,
    last_id: i64,
}

impl HistoryStore {
    /// Open the store under `key`, loading whatever is persisted.
    pub fn open(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = Self::load(storage.as_ref(), &key);
        let last_id = items
            .iter()
            .filter_map(|item| item.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            key,
            storage,
            items,
            last_id,
        }
    }

    /// Read the persisted sequence. Missing or corrupt data yields empty.
    pub fn load(storage: &dyn KeyValueStore, key: &str) -> Vec<HistoryItem> {
        let raw = match storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "No stored history, starting fresh");
                return Vec::new();
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read history, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryItem>>(&raw) {
            Ok(mut items) => {
                items.truncate(HISTORY_CAP);
                debug!(key, count = items.len(), "History loaded");
                items
            }
            Err(e) => {
                warn!(key, error = %e, "Stored history is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Items, newest first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Prepend a new item, evict beyond the cap and persist. Returns the id.
    pub fn add(&mut self, result: GeneratedResult, summary: Option<String>) -> String {
        let timestamp = Utc::now().timestamp_millis();
        // ids stay unique when two adds land in the same millisecond
        let id = timestamp.max(self.last_id + 1);
        self.last_id = id;

        let id = id.to_string();
        self.items.insert(
            0,
            HistoryItem {
                id: id.clone(),
                timestamp,
                result,
                summary,
            },
        );
        self.items.truncate(HISTORY_CAP);
        self.persist();
        id
    }

    /// Apply `update` to the item with `id`. Returns whether it existed.
    pub fn update(&mut self, id: &str, update: HistoryUpdate) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        if let Some(result) = update.result {
            item.result = result;
        }
        if let Some(summary) = update.summary {
            item.summary = Some(summary);
        }
        self.persist();
        true
    }

    /// Delete the item with `id`. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Drop every item and the persisted record.
    pub fn clear(&mut self) {
        self.items.clear();
        if let Err(e) = self.storage.remove(&self.key) {
            warn!(key = %self.key, error = %e, "Failed to remove stored history");
        }
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.items) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to serialize history");
                return;
            }
        };
        match self.storage.set(&self.key, &payload) {
            Ok(()) => debug!(key = %self.key, count = self.items.len(), "History saved"),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to persist history"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seteuk_core::error::StorageError;
    use seteuk_storage::InMemoryStore;

    fn store() -> (Arc<InMemoryStore>, HistoryStore) {
        let backend = Arc::new(InMemoryStore::new());
        let history = HistoryStore::open(backend.clone(), "history_subject");
        (backend, history)
    }

    fn result(text: &str) -> GeneratedResult {
        GeneratedResult::new(text)
    }

    fn persisted(backend: &InMemoryStore) -> Vec<HistoryItem> {
        serde_json::from_str(&backend.get("history_subject").unwrap().unwrap()).unwrap()
    }

    #[test]
    fn fifty_one_adds_keep_the_newest_fifty() {
        let (backend, mut history) = store();
        for i in 0..51 {
            history.add(result(&format!("기록 {i}")), None);
        }

        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.items()[0].result.grade_version, "기록 50");
        assert_eq!(history.items()[49].result.grade_version, "기록 1");
        assert_eq!(persisted(&backend), history.items());
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let (_, mut history) = store();
        let ids: Vec<i64> = (0..5)
            .map(|_| history.add(result("x"), None).parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn add_keeps_summary() {
        let (_, mut history) = store();
        let id = history.add(result("본문"), Some("정보 - 1등급".into()));
        assert_eq!(history.get(&id).unwrap().summary.as_deref(), Some("정보 - 1등급"));
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let (backend, mut history) = store();
        history.add(result("a"), None);
        let before = history.items().to_vec();

        assert!(!history.remove("no-such-id"));
        assert_eq!(history.items(), before.as_slice());
        assert_eq!(persisted(&backend), before);
    }

    #[test]
    fn remove_deletes_and_persists() {
        let (backend, mut history) = store();
        let keep = history.add(result("keep"), None);
        let gone = history.add(result("gone"), None);

        assert!(history.remove(&gone));
        assert_eq!(history.len(), 1);
        assert_eq!(persisted(&backend)[0].id, keep);
    }

    #[test]
    fn update_replaces_result_in_place() {
        let (backend, mut history) = store();
        let first = history.add(result("첫째"), None);
        history.add(result("둘째"), None);

        assert!(history.update(&first, HistoryUpdate::result(result("수정됨"))));
        assert_eq!(history.items()[1].result.grade_version, "수정됨");
        assert_eq!(history.items()[0].result.grade_version, "둘째");
        assert_eq!(persisted(&backend)[1].result.grade_version, "수정됨");

        assert!(!history.update("missing", HistoryUpdate::default()));
    }

    #[test]
    fn clear_removes_persisted_key() {
        let (backend, mut history) = store();
        history.add(result("a"), None);
        history.clear();
        assert!(history.is_empty());
        assert!(backend.get("history_subject").unwrap().is_none());
    }

    #[test]
    fn reopen_restores_items() {
        let (backend, mut history) = store();
        let id = history.add(result("복원"), None);

        let reopened = HistoryStore::open(backend, "history_subject");
        assert_eq!(reopened.get(&id).unwrap().result.grade_version, "복원");

        // new ids continue after the restored ones
        let mut reopened = reopened;
        let next = reopened.add(result("다음"), None);
        assert!(next.parse::<i64>().unwrap() > id.parse::<i64>().unwrap());
    }

    #[test]
    fn corrupt_history_starts_empty() {
        let backend = Arc::new(InMemoryStore::with_entries([("history_club", "not json")]));
        let history = HistoryStore::open(backend, "history_club");
        assert!(history.is_empty());
    }

    /// Accepts reads, refuses writes.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn name(&self) -> &str {
            "read_only"
        }

        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io("read-only".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io("read-only".into()))
        }
    }

    #[test]
    fn persistence_failure_keeps_memory_state() {
        let mut history = HistoryStore::open(Arc::new(ReadOnlyStore), "history_behavior");
        let id = history.add(result("메모리에만 있음"), None);
        assert!(history.get(&id).is_some());
        history.clear();
        assert!(history.is_empty());
    }
}
