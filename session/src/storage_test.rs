use super::*;

#[test]
fn memory_store_starts_empty() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn memory_store_set_then_get() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "abc").unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    store.set(TOKEN_KEY, "def").unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("def"));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_remove_absent_key_is_ok() {
    let store = MemoryStore::new();
    assert!(store.remove(USER_KEY).is_ok());
}

#[test]
fn memory_store_clones_share_entries() {
    let store = MemoryStore::new();
    let other = store.clone();
    store.set(USER_KEY, "{}").unwrap();
    assert_eq!(other.get(USER_KEY).unwrap().as_deref(), Some("{}"));
    other.remove(USER_KEY).unwrap();
    assert!(store.is_empty());
}
