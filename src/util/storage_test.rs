use super::*;
use serde_json::json;

#[test]
fn memory_storage_round_trips_values() {
    let storage = MemoryStorage::new();
    storage.save("auth-store", &json!({"token": "tok-1"}));

    assert_eq!(storage.load("auth-store"), Some(json!({"token": "tok-1"})));
    assert!(storage.load("articles-store").is_none());
}

#[test]
fn memory_storage_overwrites_existing_keys() {
    let storage = MemoryStorage::new();
    storage.save("auth-store", &json!({"token": "tok-1"}));
    storage.save("auth-store", &json!({"token": "tok-2"}));

    assert_eq!(storage.len(), 1);
    assert_eq!(storage.load("auth-store"), Some(json!({"token": "tok-2"})));
}

#[test]
fn remove_drops_only_the_named_key() {
    let storage = MemoryStorage::new();
    storage.save("auth-store", &json!({}));
    storage.save("articles-store", &json!({}));

    storage.remove("auth-store");

    assert!(storage.load("auth-store").is_none());
    assert!(storage.load("articles-store").is_some());
}

#[test]
fn clear_all_wipes_every_key() {
    let storage = MemoryStorage::new();
    storage.save("auth-store", &json!({}));
    storage.save("articles-store", &json!({}));
    storage.save("unrelated", &json!(1));

    storage.clear_all();

    assert!(storage.is_empty());
}
