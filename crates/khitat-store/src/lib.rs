// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod error;
mod persist;
mod reducer;
mod storage;
mod store;

pub use error::{StoreError, StoreErrorCode};
pub use persist::{
    decode_persisted, encode_persisted, persistence_observer, CartPersistence,
    DEFAULT_STORAGE_KEY, PERSIST_ALLOW_LIST,
};
pub use reducer::{reduce, CartAction};
pub use storage::{
    detect_storage, validate_storage_key, KeyValueStorage, LocalFsStorage, MemoryStorage,
    NoopStorage, StorageKind,
};
pub use store::{CartStore, SubscriptionId};

pub const CRATE_NAME: &str = "khitat-store";
