// SPDX-License-Identifier: Apache-2.0

use khitat_model::{CartState, DonationLineItem, ProjectId};
use khitat_store::{
    decode_persisted, detect_storage, encode_persisted, CartPersistence, CartStore,
    KeyValueStorage, LocalFsStorage, MemoryStorage, NoopStorage, StorageKind, StoreError,
    StoreErrorCode, DEFAULT_STORAGE_KEY,
};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn item(project: &str, amount: u64) -> DonationLineItem {
    DonationLineItem::new(
        ProjectId::new(project),
        "water-well",
        "Water Well",
        "https://cdn.example/w.jpg",
        amount,
        "USD",
    )
}

fn sample_cart() -> CartState {
    CartState::from_items(vec![
        item("p1", 100),
        item("p1", 80)
            .with_label("Waleemah")
            .with_description("Waleemah - $80 USD"),
        item("p2", 50),
    ])
}

struct BrokenStorage;

impl KeyValueStorage for BrokenStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::LocalFs
    }

    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::new(StoreErrorCode::Io, "disk unplugged"))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::new(StoreErrorCode::Io, "quota exceeded"))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::new(StoreErrorCode::Io, "disk unplugged"))
    }
}

#[test]
fn local_fs_round_trip_restores_items_by_value() {
    let root = tempdir().expect("tempdir");
    let persistence = CartPersistence::new(Box::new(LocalFsStorage::new(root.path().to_path_buf())));
    let cart = sample_cart();

    persistence.try_save(&cart).expect("save cart");
    assert!(root.path().join("cart.json").exists());
    assert!(!root.path().join("cart.json.tmp").exists());
    assert_eq!(persistence.load(), cart);
}

#[test]
fn save_overwrites_previous_document() {
    let storage = Arc::new(MemoryStorage::new());
    let persistence = CartPersistence::new(Box::new(Arc::clone(&storage)));
    persistence.save(&sample_cart());
    persistence.save(&CartState::default());
    assert_eq!(
        storage.get_item(DEFAULT_STORAGE_KEY).expect("read"),
        Some(r#"{"items":[]}"#.to_string())
    );
    assert_eq!(persistence.load(), CartState::default());
}

#[test]
fn missing_document_loads_empty_cart() {
    let root = tempdir().expect("tempdir");
    let persistence = CartPersistence::new(Box::new(LocalFsStorage::new(root.path().join("never-created"))));
    assert_eq!(persistence.load(), CartState::default());
}

#[test]
fn corrupt_document_loads_empty_cart() {
    let root = tempdir().expect("tempdir");
    fs::write(root.path().join("cart.json"), b"{not json").expect("write garbage");
    let persistence = CartPersistence::new(Box::new(LocalFsStorage::new(root.path().to_path_buf())));
    assert!(persistence.try_load().is_err());
    assert_eq!(persistence.load(), CartState::default());

    fs::write(root.path().join("cart.json"), b"[1,2,3]").expect("write array");
    let err = persistence.try_load().expect_err("array is not a cart");
    assert_eq!(err.code, StoreErrorCode::Decode);
    assert_eq!(persistence.load(), CartState::default());
}

#[test]
fn only_allow_listed_fields_survive_either_direction() {
    let raw = r#"{"items":[],"isCartOpen":true,"_persist":{"version":-1,"rehydrated":true}}"#;
    let decoded = decode_persisted(raw).expect("decode with extra fields");
    assert_eq!(decoded, CartState::default());

    let encoded = encode_persisted(&sample_cart()).expect("encode");
    let value: serde_json::Value = serde_json::from_str(&encoded).expect("json");
    let keys: Vec<&String> = value.as_object().expect("object").keys().collect();
    assert_eq!(keys, vec!["items"]);
}

#[test]
fn noop_storage_never_persists() {
    let persistence = CartPersistence::new(Box::new(NoopStorage));
    persistence.try_save(&sample_cart()).expect("noop save");
    assert_eq!(persistence.load(), CartState::default());
    assert_eq!(persistence.storage_kind(), StorageKind::Noop);
}

#[test]
fn detect_storage_uses_filesystem_when_directory_is_usable() {
    let root = tempdir().expect("tempdir");
    let nested = root.path().join("a").join("b");
    let storage = detect_storage(Some(&nested));
    assert_eq!(storage.kind(), StorageKind::LocalFs);
    assert!(nested.is_dir());
}

#[test]
fn detect_storage_falls_back_to_noop_when_path_is_a_file() {
    let root = tempdir().expect("tempdir");
    let file = root.path().join("occupied");
    fs::write(&file, b"x").expect("write file");
    assert_eq!(detect_storage(Some(&file)).kind(), StorageKind::Noop);
}

#[test]
fn store_with_persistence_rehydrates_and_saves_after_every_dispatch() {
    let storage = Arc::new(MemoryStorage::new());
    {
        let mut store = CartStore::with_persistence(CartPersistence::new(Box::new(Arc::clone(&storage))));
        store.add_item(item("p1", 50));
        store.add_item(item("p1", 80).with_label("Waleemah"));
    }
    let mut reopened =
        CartStore::with_persistence(CartPersistence::new(Box::new(Arc::clone(&storage))));
    assert_eq!(reopened.snapshot().len(), 2);

    reopened.clear_cart();
    let third = CartStore::with_persistence(CartPersistence::new(Box::new(storage)));
    assert!(third.snapshot().is_empty());
}

#[test]
fn custom_key_isolates_documents() {
    let storage = Arc::new(MemoryStorage::new());
    let a = CartPersistence::new(Box::new(Arc::clone(&storage))).with_key("cart-a");
    let b = CartPersistence::new(Box::new(Arc::clone(&storage))).with_key("cart-b");
    a.save(&sample_cart());
    assert_eq!(a.key(), "cart-a");
    assert_eq!(b.load(), CartState::default());
    a.purge().expect("purge");
    assert_eq!(a.load(), CartState::default());
}

#[test]
fn broken_storage_never_breaks_mutation() {
    let mut store = CartStore::with_persistence(CartPersistence::new(Box::new(BrokenStorage)));
    assert!(store.snapshot().is_empty());
    store.add_item(item("p1", 50));
    store.update_item_amount(ProjectId::new("p1"), 150);
    assert_eq!(store.snapshot().items[0].amount, 150);
}

#[test]
fn swallowed_save_errors_are_logged_at_warn() {
    use std::io;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);
    struct SinkWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> MakeWriter<'a> for Sink {
        type Writer = SinkWriter;
        fn make_writer(&'a self) -> Self::Writer {
            SinkWriter(Arc::clone(&self.0))
        }
    }

    impl io::Write for SinkWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let sink = Sink::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        CartPersistence::new(Box::new(BrokenStorage)).save(&sample_cart());
    });

    let text = String::from_utf8(sink.0.lock().expect("lock").clone()).expect("utf8");
    let line = text.lines().find(|l| !l.trim().is_empty()).expect("log line");
    let parsed: serde_json::Value = serde_json::from_str(line).expect("json log line");
    assert_eq!(parsed["level"], "WARN");
    assert_eq!(parsed["fields"]["key"], "cart");
    assert!(parsed["fields"]["error"]
        .as_str()
        .is_some_and(|e| e.contains("quota exceeded")));
}
