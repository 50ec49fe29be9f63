//! Persistent favorites for the gallery.
//!
//! The id set under [`FAVORITES_KEY`] is the source of truth. Display
//! snapshots live under their own key and never decide membership.

mod storage;

pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError};

use api_client::{Photo, PhotoId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const FAVORITES_KEY: &str = "favoritePhotos";
pub const SNAPSHOTS_KEY: &str = "favoritePhotoSnapshots";

pub type FavoriteSet = BTreeSet<PhotoId>;
pub type SnapshotMap = BTreeMap<PhotoId, FavoriteSnapshot>;

/// Enough of a photo to list it after it has left the fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSnapshot {
    pub id: PhotoId,
    pub author: String,
    pub download_url: String,
    pub page_url: String,
}

impl From<&Photo> for FavoriteSnapshot {
    fn from(photo: &Photo) -> Self {
        FavoriteSnapshot {
            id: photo.id.clone(),
            author: photo.author.clone(),
            download_url: photo.download_url.clone(),
            page_url: photo.page_url.clone(),
        }
    }
}

impl FavoriteSnapshot {
    /// Placeholder for a favorite we never saw the record of.
    pub fn id_only(id: PhotoId) -> Self {
        FavoriteSnapshot {
            id,
            author: String::new(),
            download_url: String::new(),
            page_url: String::new(),
        }
    }
}

/// Flip membership of `id`, leaving `set` untouched.
pub fn toggle(set: &FavoriteSet, id: &PhotoId) -> FavoriteSet {
    let mut next = set.clone();
    if !next.remove(id) {
        next.insert(id.clone());
    }
    next
}

pub struct FavoritesStore {
    storage: Box<dyn KeyValueStorage>,
}

impl FavoritesStore {
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        FavoritesStore {
            storage: Box::new(storage),
        }
    }

    /// Read the persisted set. Missing or corrupt data yields an empty set.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    pub fn load(&self) -> FavoriteSet {
        match self.read_json::<Vec<PhotoId>>(FAVORITES_KEY) {
            Some(ids) => {
                let set: FavoriteSet = ids.into_iter().collect();
                tracing::info!("Loaded {} favorites", set.len());
                set
            }
            None => FavoriteSet::new(),
        }
    }

    /// Write the set, or drop the key once the set is empty. Failures are
    /// logged; the caller's copy stays authoritative.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self, set)))]
    pub fn save(&self, set: &FavoriteSet) {
        if set.is_empty() {
            self.clear(FAVORITES_KEY);
            return;
        }
        let ids: Vec<&PhotoId> = set.iter().collect();
        self.write_json(FAVORITES_KEY, &ids);
    }

    pub fn load_snapshots(&self) -> SnapshotMap {
        self.read_json::<Vec<FavoriteSnapshot>>(SNAPSHOTS_KEY)
            .map(|list| list.into_iter().map(|s| (s.id.clone(), s)).collect())
            .unwrap_or_default()
    }

    pub fn save_snapshots(&self, snapshots: &SnapshotMap) {
        if snapshots.is_empty() {
            self.clear(SNAPSHOTS_KEY);
            return;
        }
        let list: Vec<&FavoriteSnapshot> = snapshots.values().collect();
        self.write_json(SNAPSHOTS_KEY, &list);
    }

    fn clear(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            tracing::warn!("Failed to clear {}: {}", key, e);
        }
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring corrupt value under {}: {}", key, e);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let data = match serde_json::to_string(value) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Failed to serialize {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.storage.set(key, &data) {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> FavoriteSet {
        list.iter().map(|s| PhotoId::from(*s)).collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let empty = FavoriteSet::new();
        let id = PhotoId::from("2");
        let added = toggle(&empty, &id);
        assert!(added.contains(&id));
        assert!(empty.is_empty());
        let removed = toggle(&added, &id);
        assert_eq!(removed, empty);
    }

    #[test]
    fn test_toggle_leaves_other_members() {
        let set = ids(&["1", "3"]);
        let next = toggle(&set, &PhotoId::from("2"));
        assert_eq!(next, ids(&["1", "2", "3"]));
    }

    #[test]
    fn test_load_absent_is_empty() {
        let store = FavoritesStore::new(MemoryStorage::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let storage = MemoryStorage::new();
        storage.insert_raw(FAVORITES_KEY, "{not json");
        let store = FavoritesStore::new(storage);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let storage = MemoryStorage::new();
        storage.insert_raw(
            FAVORITES_KEY,
            r#"{"id":"1","author":"Alice","download_url":"d","url":"u","width":1,"height":1}"#,
        );
        let store = FavoritesStore::new(storage);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_accepts_integer_ids() {
        let storage = MemoryStorage::new();
        storage.insert_raw(FAVORITES_KEY, r#"[2, "10"]"#);
        let store = FavoritesStore::new(storage);
        assert_eq!(store.load(), ids(&["10", "2"]));
    }

    #[test]
    fn test_save_writes_id_array() {
        let storage = MemoryStorage::new();
        let store = FavoritesStore::new(storage.clone());
        store.save(&ids(&["2"]));
        assert_eq!(storage.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["2"]"#));
    }

    #[test]
    fn test_saving_empty_set_clears_key() {
        let storage = MemoryStorage::new();
        let store = FavoritesStore::new(storage.clone());
        store.save(&ids(&["2"]));
        store.save(&FavoriteSet::new());
        assert_eq!(storage.get(FAVORITES_KEY).unwrap(), None);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let store = FavoritesStore::new(MemoryStorage::read_only());
        store.save(&ids(&["1"]));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_snapshots_roundtrip() {
        let store = FavoritesStore::new(MemoryStorage::new());
        let mut map = SnapshotMap::new();
        let snap = FavoriteSnapshot {
            id: PhotoId::from("5"),
            author: "Alice".into(),
            download_url: "d".into(),
            page_url: "u".into(),
        };
        map.insert(snap.id.clone(), snap);
        store.save_snapshots(&map);
        assert_eq!(store.load_snapshots(), map);
    }
}
