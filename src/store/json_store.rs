use thiserror::Error;
use tracing::{debug, info, warn};

use crate::store::schema::{Category, Library};
use crate::store::storage::{KvStorage, StorageError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not serialize flashcards: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Reads and writes the whole [`Library`] as one JSON document in a single
/// storage slot.
pub struct JsonStore {
    storage: Box<dyn KvStorage>,
    key: String,
    categories: Vec<Category>,
}

impl JsonStore {
    pub fn new(storage: Box<dyn KvStorage>, key: &str, categories: Vec<Category>) -> Self {
        Self {
            storage,
            key: key.to_string(),
            categories,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Load the library. Never fails: a missing slot gives an empty library,
    /// and unreadable data is logged and replaced with an empty library.
    pub fn load(&self) -> Library {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                debug!(key = %self.key, "no saved flashcards, starting empty");
                return Library::empty(&self.categories);
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read saved flashcards, starting empty");
                return Library::empty(&self.categories);
            }
        };

        match Library::parse(&raw, &self.categories) {
            Ok(library) => {
                info!(
                    key = %self.key,
                    cards = library.total_cards(),
                    "loaded flashcards"
                );
                library
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "saved flashcards are corrupt, resetting");
                Library::empty(&self.categories)
            }
        }
    }

    pub fn save(&mut self, library: &Library) -> Result<(), StoreError> {
        let json = serde_json::to_string(library)?;
        self.storage.set(&self.key, &json)?;
        debug!(key = %self.key, bytes = json.len(), "saved flashcards");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::{Card, DEFAULT_CATEGORIES, STORAGE_KEY};
    use crate::store::storage::{FileStorage, MemoryStorage};
    use chrono::Utc;
    use tempfile::TempDir;

    fn categories() -> Vec<Category> {
        DEFAULT_CATEGORIES.iter().map(|c| Category::new(*c)).collect()
    }

    fn store_with(storage: MemoryStorage) -> JsonStore {
        JsonStore::new(Box::new(storage), STORAGE_KEY, categories())
    }

    fn sample_card(id: &str, term: &str) -> Card {
        Card::new(
            id.to_string(),
            term,
            "data:image/png;base64,iVBORw0KGgo=".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn load_without_saved_data_is_empty() {
        let store = store_with(MemoryStorage::new());
        assert_eq!(store.load(), Library::empty(&categories()));
    }

    #[test]
    fn load_treats_empty_text_as_absent() {
        let store = store_with(MemoryStorage::new().with_entry(STORAGE_KEY, ""));
        assert_eq!(store.load(), Library::empty(&categories()));
    }

    #[test]
    fn malformed_text_resets_every_category() {
        let store = store_with(MemoryStorage::new().with_entry(STORAGE_KEY, "{\"산업안전일반\": [ broken"));
        let lib = store.load();
        for category in categories() {
            assert!(lib.cards(&category).is_empty());
        }
    }

    #[test]
    fn bad_record_only_drops_itself() {
        let raw = format!(
            r#"{{"산업안전일반": [{}], "기업진단지도": [{{"id": 1}}, {}]}}"#,
            serde_json::to_string(&sample_card("a", "지게차")).unwrap(),
            serde_json::to_string(&sample_card("b", "위험성평가")).unwrap()
        );
        let store = store_with(MemoryStorage::new().with_entry(STORAGE_KEY, &raw));
        let lib = store.load();
        assert_eq!(lib.total_cards(), 2);
        assert_eq!(lib.cards(&Category::new("산업안전일반"))[0].term, "지게차");
        assert_eq!(lib.cards(&Category::new("기업진단지도"))[0].term, "위험성평가");
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = store_with(MemoryStorage::new());
        let mut lib = Library::empty(&categories());
        let cat = Category::new("산업안전일반");
        lib.push(&cat, sample_card("1-a", "지게차"));
        lib.push(&cat, sample_card("1-b", "고소작업대"));
        lib.push(&Category::new("기업진단지도"), sample_card("1-c", "위험성평가"));

        store.save(&lib).unwrap();
        assert_eq!(store.load(), lib);
    }

    #[test]
    fn save_failure_is_reported() {
        let mut store = store_with(MemoryStorage::with_quota(16));
        let mut lib = Library::empty(&categories());
        lib.push(&Category::new("산업안전일반"), sample_card("1-a", "지게차"));

        let err = store.save(&lib).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Storage(StorageError::QuotaExceeded { .. })
        ));
    }

    #[test]
    fn file_backed_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut store = JsonStore::new(Box::new(storage), STORAGE_KEY, categories());

        let mut lib = Library::empty(&categories());
        lib.push(&Category::new("산업안전보건법"), sample_card("9-z", "안전보건관리책임자"));
        store.save(&lib).unwrap();

        let reopened = JsonStore::new(
            Box::new(FileStorage::with_base_dir(dir.path().to_path_buf()).unwrap()),
            STORAGE_KEY,
            categories(),
        );
        assert_eq!(reopened.load(), lib);
        assert!(dir.path().join(format!("{STORAGE_KEY}.json")).exists());
    }
}
