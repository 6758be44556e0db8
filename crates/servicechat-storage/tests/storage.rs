use std::sync::Arc;

use servicechat_core::models::conversation::{ConversationKey, ConversationScope};
use servicechat_core::models::message::{ConversationMessage, MessageRole};
use servicechat_storage::conversation::ConversationStore;
use servicechat_storage::error::StorageError;
use servicechat_storage::identity::get_or_create_id;
use servicechat_storage::kv::{FileStore, KeyValueStore, MemoryStore, file_name_for};

fn ts(secs: i64) -> jiff::Timestamp {
    jiff::Timestamp::from_second(secs).unwrap()
}

fn key(scope: ConversationScope) -> ConversationKey {
    ConversationKey::new("session-1", scope)
}

/// A store whose every operation fails.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk on fire".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk on fire".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk on fire".into()))
    }
}

#[test]
fn memory_store_set_get_remove() {
    let kv = MemoryStore::new();
    assert_eq!(kv.get("a").unwrap(), None);
    kv.set("a", "1").unwrap();
    assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
    kv.remove("a").unwrap();
    kv.remove("a").unwrap();
    assert_eq!(kv.get("a").unwrap(), None);
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let kv = FileStore::open(dir.path()).unwrap();
    kv.set("chatHistory-u-new-baby", "[]").unwrap();

    let reopened = FileStore::open(dir.path()).unwrap();
    assert_eq!(reopened.get("chatHistory-u-new-baby").unwrap().as_deref(), Some("[]"));

    reopened.remove("chatHistory-u-new-baby").unwrap();
    reopened.remove("chatHistory-u-new-baby").unwrap();
    assert_eq!(kv.get("chatHistory-u-new-baby").unwrap(), None);
}

#[test]
fn file_store_leaves_no_staging_files() {
    let dir = tempfile::tempdir().unwrap();
    let kv = FileStore::open(dir.path()).unwrap();
    kv.set("userId", "abc").unwrap();
    kv.set("userId", "def").unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, ["userId"]);
    assert_eq!(kv.get("userId").unwrap().as_deref(), Some("def"));
}

#[test]
fn file_names_escape_unsafe_characters() {
    assert_eq!(file_name_for("chatHistory-abc-custom"), "chatHistory-abc-custom");
    assert_eq!(file_name_for("../etc"), "%2E%2E%2Fetc");
    assert_ne!(file_name_for("a/b"), file_name_for("a_b"));
}

#[test]
fn conversation_round_trip_keeps_order_and_timestamps() {
    let store = ConversationStore::new(Arc::new(MemoryStore::new()));
    let k = key(ConversationScope::Scenario("new-baby".into()));
    let messages = vec![
        ConversationMessage::bot("welcome", "Welcome!", ts(1_700_000_000)),
        ConversationMessage::user("user-1", "When is the deadline?", ts(1_700_000_060)),
    ];
    store.save(&k, &messages);

    let loaded = store.load(&k);
    assert_eq!(loaded, messages);
    assert_eq!(loaded[1].role, MessageRole::User);
}

#[test]
fn placeholders_are_never_persisted() {
    let kv = Arc::new(MemoryStore::new());
    let store = ConversationStore::new(kv.clone());
    let k = key(ConversationScope::Custom);

    store.save(&k, &[ConversationMessage::placeholder("bot-connecting-1-1", ts(1))]);
    assert!(kv.keys().is_empty());

    store.save(
        &k,
        &[
            ConversationMessage::bot("welcome", "Hi", ts(1)),
            ConversationMessage::placeholder("bot-thinking-2-2", ts(2)),
        ],
    );
    let loaded = store.load(&k);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "welcome");
}

#[test]
fn scopes_are_isolated() {
    let store = ConversationStore::new(Arc::new(MemoryStore::new()));
    let baby = key(ConversationScope::Scenario("new-baby".into()));
    let storm = key(ConversationScope::Scenario("storm-damage".into()));

    store.save(&baby, &[ConversationMessage::bot("welcome", "baby", ts(1))]);
    store.save(&storm, &[ConversationMessage::bot("welcome", "storm", ts(1))]);
    store.clear(&baby);

    assert!(store.load(&baby).is_empty());
    assert_eq!(store.load(&storm)[0].content, "storm");
}

#[test]
fn malformed_log_loads_empty() {
    let kv = Arc::new(MemoryStore::new());
    let k = key(ConversationScope::Custom);
    kv.set(&k.storage_key(), "{not json").unwrap();

    let store = ConversationStore::new(kv);
    assert!(store.load(&k).is_empty());
    assert!(matches!(store.try_load(&k), Err(StorageError::Serialization(_))));
}

#[test]
fn broken_store_degrades_without_panicking() {
    let store = ConversationStore::new(Arc::new(BrokenStore));
    let k = key(ConversationScope::Custom);
    store.save(&k, &[ConversationMessage::bot("welcome", "Hi", ts(1))]);
    assert!(store.load(&k).is_empty());
    store.clear(&k);
}

#[test]
fn session_id_is_stable() {
    let kv = MemoryStore::new();
    let first = get_or_create_id(&kv);
    let second = get_or_create_id(&kv);
    assert_eq!(first, second);
    assert_eq!(kv.get("userId").unwrap().as_deref(), Some(first.as_str()));
    assert!(uuid_like(&first));
}

#[test]
fn session_id_falls_back_when_store_is_broken() {
    let a = get_or_create_id(&BrokenStore);
    let b = get_or_create_id(&BrokenStore);
    assert_ne!(a, b);
}

fn uuid_like(s: &str) -> bool {
    s.len() == 36 && s.chars().filter(|c| *c == '-').count() == 4
}
