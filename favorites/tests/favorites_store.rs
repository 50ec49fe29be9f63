use api_client::PhotoId;
use favorites::{toggle, FavoriteSet, FavoritesStore, KeyValueStorage, SqliteStorage, FAVORITES_KEY};
use rusqlite::Connection;
use tempfile::NamedTempFile;

#[test]
fn test_new_applies_migrations() {
    let file = NamedTempFile::new().unwrap();
    let _ = SqliteStorage::new(file.path()).unwrap();
    let conn = Connection::open(file.path()).unwrap();
    let version: i64 = conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, 1);
}

#[test]
fn test_favorites_survive_reopen() {
    let file = NamedTempFile::new().unwrap();
    {
        let store = FavoritesStore::new(SqliteStorage::new(file.path()).unwrap());
        let set = toggle(&store.load(), &PhotoId::from("2"));
        store.save(&set);
    }
    let store = FavoritesStore::new(SqliteStorage::new(file.path()).unwrap());
    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains(&PhotoId::from("2")));
}

#[test]
fn test_load_save_load_is_stable() {
    let file = NamedTempFile::new().unwrap();
    let storage = SqliteStorage::new(file.path()).unwrap();
    storage.set(FAVORITES_KEY, r#"["7", 3, "12"]"#).unwrap();
    let store = FavoritesStore::new(storage);

    let first = store.load();
    store.save(&first);
    let second = store.load();
    assert_eq!(first, second);
    assert_eq!(second.len(), 3);
}

#[test]
fn test_corrupt_row_recovers_to_empty() {
    let file = NamedTempFile::new().unwrap();
    let storage = SqliteStorage::new(file.path()).unwrap();
    storage.set(FAVORITES_KEY, "null").unwrap();
    let store = FavoritesStore::new(storage);
    assert_eq!(store.load(), FavoriteSet::new());
}
